//! mulk.az listings. Numeric columns arrive pre-parsed by the scraper.

use super::{listing_id, MapContext};
use crate::data::parse::to_integer;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "mulk";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "listing_id",
            "area_numeric",
            "rooms_numeric",
            "current_floor",
            "total_floors",
            "price_numeric",
            "location_district",
            "full_address",
            "deed_available",
            "listing_date",
            "url",
            "image_count",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| {
            let mut listing = Listing {
                id: listing_id(&row, "listing_id"),
                area_value: row.number("area_numeric"),
                rooms: row.number("rooms_numeric"),
                floor: row.number("current_floor"),
                floors: row.number("total_floors"),
                price_value: Some(row.number("price_numeric").unwrap_or(0.0)),
                location_name: row.text("location_district"),
                location_full_name: row.text("full_address"),
                has_bill_of_sale: Some(row.raw("deed_available") == Some("Yes")),
                updated_at: row.text("listing_date"),
                url: row.text("url"),
                photos_count: Some(row.number("image_count").and_then(to_integer).unwrap_or(0)),
                contact_phone: row.text("contact_phone"),
                contact_name: row.text("contact_person"),
                description: row.text("description"),
                ..ctx.listing(SOURCE_ID)
            };
            if let Some(scraped_at) = row.text("scraped_at") {
                listing.scraped_at = Some(scraped_at);
            }
            listing
        })
        .collect();

    Ok(listings)
}
