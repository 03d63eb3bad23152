//! unvan.az listings.

use super::{listing_id, MapContext};
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "unvan";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "id",
            "area",
            "room_count",
            "price",
            "address",
            "address_2",
            "owner",
            "date",
            "link",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "id"),
            area_value: row.extracted("area"),
            rooms: row.extracted("room_count"),
            price_value: Some(row.extracted("price").unwrap_or(0.0)),
            location_name: row.text("address"),
            location_full_name: row.text("address_2"),
            company_name: row.text("owner"),
            updated_at: row.text("date"),
            url: row.text("link"),
            contact_phone: row.text("phone"),
            description: row.text_from(&["long_descr", "short_descr"]),
            ..ctx.listing(SOURCE_ID)
        })
        .collect();

    Ok(listings)
}
