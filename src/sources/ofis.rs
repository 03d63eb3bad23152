//! ofis.az commercial listings. Headers are in Azerbaijani.

use super::{listing_id, MapContext};
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "ofis_listings";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "listing_id",
            "Sahə",
            "Otaq Sayı",
            "Mərtəbə",
            "Mərtəbə sayı",
            "price",
            "Şəhər",
            "Ünvan",
            "date",
            "url",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "listing_id"),
            area_value: row.extracted("Sahə"),
            rooms: row.number("Otaq Sayı"),
            floor: row.number("Mərtəbə"),
            floors: row.number("Mərtəbə sayı"),
            price_value: Some(row.extracted("price").unwrap_or(0.0)),
            city_name: row.text("Şəhər"),
            location_name: row.text("Ünvan"),
            is_business: Some(true),
            updated_at: row.text("date"),
            url: row.text("url"),
            contact_phone: row.text("phone"),
            contact_name: row.text("contact_name"),
            description: row.text("description"),
            ..ctx.listing(SOURCE_ID)
        })
        .collect();

    Ok(listings)
}
