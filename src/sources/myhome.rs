//! myhome.az listings.

use super::{listing_id, MapContext};
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "myhome";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "id",
            "area",
            "room_count",
            "floor",
            "floor_count",
            "city",
            "region",
            "address",
            "price",
            "formatted_date",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "id"),
            area_value: row.number("area"),
            rooms: row.number("room_count"),
            floor: row.number("floor"),
            floors: row.number("floor_count"),
            city_name: row.text("city"),
            location_name: row.text("region"),
            location_full_name: row.text("address"),
            price_value: Some(row.extracted("price").unwrap_or(0.0)),
            has_mortgage: Some(row.flag_or("credit_possible", false)),
            has_repair: Some(row.flag_or("is_repaired", false)),
            vipped: Some(row.flag_or("is_vip", false)),
            featured: Some(row.flag_or("is_premium", false)),
            updated_at: row.text("formatted_date"),
            photos_count: Some(0),
            contact_phone: row.text("phone_number"),
            latitude: row.number("lat"),
            longitude: row.number("lng"),
            description: row.text("description"),
            ..ctx.listing(SOURCE_ID)
        })
        .collect();

    Ok(listings)
}
