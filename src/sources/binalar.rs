//! binalar.az listings.

use super::{listing_id, MapContext};
use crate::data::parse::split_floor;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "binalar_listings";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &["id", "area", "rooms", "floor", "price_raw", "address", "url"],
    )?;

    let listings = table
        .rows()
        .map(|row| {
            let (floor, floors) = row.raw("floor").map(split_floor).unwrap_or((None, None));
            Listing {
                id: listing_id(&row, "id"),
                area_value: row.number("area"),
                rooms: row.number("rooms"),
                floor,
                floors,
                price_value: Some(row.number("price_raw").unwrap_or(0.0)),
                location_name: row.text("address"),
                url: row.text("url"),
                updated_at: row.text("date"),
                contact_phone: row.text("phone"),
                description: row.text("description"),
                ..ctx.listing(SOURCE_ID)
            }
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::*;

    #[test]
    fn test_mapping_splits_floor() {
        let t = table(
            &["id", "area", "rooms", "floor", "price_raw", "address", "url", "date", "phone"],
            &[
                &["31", "1,100", "3", "4/16", "210000", "Xətai", "https://binalar.az/31", "Bu gün", "055"],
                &["32", "", "", "12", "", "", "", "", ""],
            ],
        );
        let listings = map(&t, &context()).unwrap();
        assert_eq!(listings[0].area_value, Some(1100.0));
        assert_eq!(listings[0].floor, Some(4.0));
        assert_eq!(listings[0].floors, Some(16.0));
        assert_eq!(listings[0].price_value, Some(210000.0));
        assert_eq!(listings[0].location_name.as_deref(), Some("Xətai"));
        assert_eq!(listings[0].contact_phone.as_deref(), Some("055"));
        assert_eq!(listings[0].description, None);

        assert_eq!(listings[1].floor, Some(12.0));
        assert_eq!(listings[1].floors, None);
        assert_eq!(listings[1].price_value, Some(0.0));
    }

    #[test]
    fn test_requires_price_raw() {
        let t = table(&["id", "area", "rooms", "floor"], &[]);
        assert_missing(map(&t, &context()), "price_raw");
    }
}
