//! villa.az detached-house listings.

use super::{listing_id, MapContext};
use crate::data::parse::parse_floor;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "villa_az";

const PROPERTY_TYPE: &str = "villa";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "listing_id",
            "Sahə, m²",
            "Otaq sayı",
            "price",
            "Şəhər",
            "address",
            "Əmlak sənədi",
            "date",
            "url",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "listing_id"),
            area_value: row.number("Sahə, m²"),
            rooms: row.number("Otaq sayı"),
            floor: row.raw("Mərtəbə").and_then(parse_floor),
            price_value: Some(row.extracted("price").unwrap_or(0.0)),
            city_name: row.text("Şəhər"),
            location_name: row.text("address"),
            has_bill_of_sale: Some(row.present("Əmlak sənədi")),
            updated_at: row.text("date"),
            url: row.text("url"),
            contact_phone: row.text("phones"),
            contact_name: row.text("owner_name"),
            description: row.text("description"),
            property_type: Some(PROPERTY_TYPE.to_string()),
            ..ctx.listing(SOURCE_ID)
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::*;

    const HEADERS: [&str; 13] = [
        "listing_id",
        "Sahə, m²",
        "Otaq sayı",
        "price",
        "Şəhər",
        "address",
        "Əmlak sənədi",
        "date",
        "url",
        "phones",
        "description",
        "Mərtəbə",
        "owner_name",
    ];

    #[test]
    fn test_mapping_tags_villa() {
        let t = table(
            &HEADERS,
            &[&[
                "v1", "320", "6", "450 000 AZN", "Bakı", "Mərdəkan", "Çıxarış", "2025-09-10",
                "https://villa.az/v1", "050", "Hovuzlu", "2/3", "Kamran",
            ]],
        );
        let l = &map(&t, &context()).unwrap()[0];
        assert_eq!(l.area_value, Some(320.0));
        assert_eq!(l.rooms, Some(6.0));
        assert_eq!(l.price_value, Some(450000.0));
        assert_eq!(l.floor, Some(2.0));
        assert_eq!(l.has_bill_of_sale, Some(true));
        assert_eq!(l.property_type.as_deref(), Some("villa"));
        assert_eq!(l.contact_name.as_deref(), Some("Kamran"));
    }

    #[test]
    fn test_floor_column_is_optional() {
        let t = table(&HEADERS[..11], &[&[""; 11]]);
        let l = &map(&t, &context()).unwrap()[0];
        assert_eq!(l.floor, None);
        assert_eq!(l.has_bill_of_sale, Some(false));
        assert_eq!(l.property_type.as_deref(), Some("villa"));
    }

    #[test]
    fn test_contact_columns_are_optional() {
        let t = table(
            &HEADERS[..9],
            &[&["v2", "280", "5", "390 000", "Bakı", "Novxanı", "", "2025-09-11", ""]],
        );
        let listings = map(&t, &context()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].price_value, Some(390000.0));
        assert_eq!(listings[0].contact_phone, None);
        assert_eq!(listings[0].description, None);
    }

    #[test]
    fn test_requires_url() {
        let t = table(&HEADERS[..8], &[]);
        assert_missing(map(&t, &context()), "url");
    }
}
