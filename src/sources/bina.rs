//! bina.az exports: the baseline sale CSV and the older XLSX scrape.

use super::{listing_id, MapContext};
use crate::data::parse::{parse_floor, to_integer};
use crate::data::{EtlError, RawTable};
use crate::schema::{Listing, DEFAULT_CURRENCY};

pub const SALE_ID: &str = "bina_sale";
pub const XLSX_ID: &str = "bina_xlsx";

/// The sale export already follows the baseline layout; columns are copied and typed.
pub fn map_sale(table: &RawTable, _ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "id"),
            area_value: row.number("area_value"),
            area_units: row.text("area_units"),
            leased: row.flag("leased"),
            floor: row.number("floor"),
            floors: row.number("floors"),
            rooms: row.number("rooms"),
            city_id: row.text("city_id"),
            city_name: row.text("city_name"),
            location_id: row.text("location_id"),
            location_name: row.text("location_name"),
            location_full_name: row.text("location_full_name"),
            price_value: row.number("price_value"),
            price_currency: row.text("price_currency"),
            company_id: row.text("company_id"),
            company_name: row.text("company_name"),
            company_target_type: row.text("company_target_type"),
            has_mortgage: row.flag("has_mortgage"),
            has_bill_of_sale: row.flag("has_bill_of_sale"),
            has_repair: row.flag("has_repair"),
            paid_daily: row.flag("paid_daily"),
            is_business: row.flag("is_business"),
            vipped: row.flag("vipped"),
            featured: row.flag("featured"),
            updated_at: row.text("updated_at"),
            path: row.text("path"),
            photos_count: row.number("photos_count").and_then(to_integer),
            photos: row.text("photos"),
            url: row.text("url"),
            scraped_at: row.text("scraped_at"),
            source_dataset: Some(SALE_ID.to_string()),
            ..Default::default()
        })
        .collect();

    Ok(listings)
}

pub fn map_xlsx(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        XLSX_ID,
        &[
            "item_id",
            "area",
            "room count",
            "floor",
            "price",
            "mortgage",
            "url",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| {
            let owner = row.text("owner name");
            Listing {
                id: listing_id(&row, "item_id"),
                area_value: row.extracted("area"),
                rooms: row.extracted("room count"),
                floor: row.raw("floor").and_then(parse_floor),
                price_value: Some(row.number("price").unwrap_or(0.0)),
                price_currency: Some(
                    row.text("currency")
                        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                ),
                has_mortgage: Some(row.present("mortgage")),
                company_name: owner.clone(),
                url: row.text("url"),
                contact_phone: row.text("phone number"),
                contact_name: owner,
                description: row.text("description"),
                ..ctx.listing(XLSX_ID)
            }
        })
        .collect();

    Ok(listings)
}
