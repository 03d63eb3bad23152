//! binam.az listings, keyed by listing code.

use super::{listing_id, MapContext};
use crate::data::parse::parse_floor;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "binam_listings";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "listing_code",
            "area",
            "rooms",
            "floor",
            "price",
            "country_city",
            "district",
            "listing_date",
            "url",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "listing_code"),
            area_value: row.extracted("area"),
            rooms: row.extracted("rooms"),
            floor: row.raw("floor").and_then(parse_floor),
            price_value: Some(row.extracted("price").unwrap_or(0.0)),
            city_name: row.text("country_city"),
            location_name: row.text("district"),
            location_full_name: row.text("address"),
            company_name: row.text("company_name"),
            updated_at: row.text("listing_date"),
            url: row.text("url"),
            contact_phone: row.text_from(&["phone", "mobile"]),
            contact_name: row.text("contact_name"),
            description: row.text("description"),
            ..ctx.listing(SOURCE_ID)
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::*;

    const HEADERS: [&str; 15] = [
        "listing_code",
        "area",
        "rooms",
        "floor",
        "price",
        "country_city",
        "district",
        "listing_date",
        "url",
        "description",
        "address",
        "company_name",
        "phone",
        "mobile",
        "contact_name",
    ];

    #[test]
    fn test_mapping_with_phone_fallback() {
        let t = table(
            &HEADERS,
            &[&[
                "BN-77", "88 m²", "3", "8/16", "199,500", "Azərbaycan, Bakı", "Səbail",
                "2025-09-25", "https://binam.az/BN-77", "Dənizə baxan", "Bayıl", "Binam MMC",
                "", "0707778899", "Səbinə",
            ]],
        );
        let l = &map(&t, &context()).unwrap()[0];
        assert_eq!(l.id.as_deref(), Some("BN-77"));
        assert_eq!(l.area_value, Some(88.0));
        assert_eq!(l.floor, Some(8.0));
        assert_eq!(l.price_value, Some(199500.0));
        assert_eq!(l.city_name.as_deref(), Some("Azərbaycan, Bakı"));
        assert_eq!(l.location_full_name.as_deref(), Some("Bayıl"));
        assert_eq!(l.company_name.as_deref(), Some("Binam MMC"));
        assert_eq!(l.contact_phone.as_deref(), Some("0707778899"));
    }

    #[test]
    fn test_description_is_optional() {
        let t = table(
            &HEADERS[..9],
            &[&["BN-78", "70", "2", "4/9", "150000", "Bakı", "Xətai", "2025-09-26", ""]],
        );
        let listings = map(&t, &context()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].price_value, Some(150000.0));
        assert_eq!(listings[0].description, None);
        assert_eq!(listings[0].contact_phone, None);
    }

    #[test]
    fn test_requires_listing_date() {
        let t = table(&HEADERS[..7], &[]);
        assert_missing(map(&t, &context()), "listing_date");
    }
}
