//! emlak.az listings.

use super::{listing_id, MapContext};
use crate::data::parse::parse_floor;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "emlakAz";

const BASE_URL: &str = "https://emlak.az";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "id",
            "area",
            "room_count",
            "flat",
            "price",
            "repair_type",
            "document_type",
            "date",
            "href",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| {
            let seller = row.text("seller_name");
            Listing {
                id: listing_id(&row, "id"),
                area_value: row.extracted("area"),
                rooms: row.extracted("room_count"),
                floor: row.raw("flat").and_then(parse_floor),
                price_value: Some(row.extracted("price").unwrap_or(0.0)),
                has_repair: Some(row.present("repair_type")),
                has_bill_of_sale: Some(row.present("document_type")),
                company_name: seller.clone(),
                updated_at: row.text("date"),
                url: row.text("href").map(|href| format!("{BASE_URL}{href}")),
                contact_phone: row.text_from(&["phone_cleaned", "phone_numbers"]),
                contact_name: seller,
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

    const HEADERS: [&str; 13] = [
        "id",
        "area",
        "room_count",
        "flat",
        "price",
        "repair_type",
        "document_type",
        "date",
        "href",
        "description",
        "phone_cleaned",
        "phone_numbers",
        "seller_name",
    ];

    #[test]
    fn test_mapping_builds_absolute_url() {
        let t = table(
            &HEADERS,
            &[&[
                "2201", "104 m²", "4 otaq", "10/17", "330,000", "Euro təmir", "", "Dünən",
                "/elan/2201", "Təcili", "", "+994 55 123 45 67", "Orxan",
            ]],
        );
        let l = &map(&t, &context()).unwrap()[0];
        assert_eq!(l.url.as_deref(), Some("https://emlak.az/elan/2201"));
        assert_eq!(l.area_value, Some(104.0));
        assert_eq!(l.rooms, Some(4.0));
        assert_eq!(l.floor, Some(10.0));
        assert_eq!(l.price_value, Some(330000.0));
        assert_eq!(l.has_repair, Some(true));
        assert_eq!(l.has_bill_of_sale, Some(false));
        assert_eq!(l.contact_phone.as_deref(), Some("+994 55 123 45 67"));
        assert_eq!(l.contact_name.as_deref(), Some("Orxan"));
        assert_eq!(l.company_name.as_deref(), Some("Orxan"));
    }

    #[test]
    fn test_missing_href_leaves_url_empty() {
        let t = table(&HEADERS[..10], &[&["1", "", "", "", "", "", "", "", "", ""]]);
        let l = &map(&t, &context()).unwrap()[0];
        assert_eq!(l.url, None);
        assert_eq!(l.price_value, Some(0.0));
        assert_eq!(l.contact_phone, None);
    }

    #[test]
    fn test_description_is_optional() {
        let t = table(
            &HEADERS[..9],
            &[&["2202", "60 m²", "2 otaq", "3/9", "150,000", "", "Kupça", "Bu gün", "/elan/2202"]],
        );
        let listings = map(&t, &context()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].price_value, Some(150000.0));
        assert_eq!(listings[0].has_bill_of_sale, Some(true));
        assert_eq!(listings[0].description, None);
    }

    #[test]
    fn test_requires_href() {
        let t = table(&HEADERS[..8], &[]);
        assert_missing(map(&t, &context()), "href");
    }
}
