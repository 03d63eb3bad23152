//! evv.az listings.

use super::{listing_id, MapContext};
use crate::data::parse::parse_floor;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const SOURCE_ID: &str = "evv_az";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "listing_id",
            "area",
            "rooms",
            "floor",
            "price",
            "city",
            "location",
            "document",
            "mortgage",
            "url",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| {
            let seller = row.text("seller_name");
            Listing {
                id: listing_id(&row, "listing_id"),
                area_value: row.extracted("area"),
                rooms: row.extracted("rooms"),
                floor: row.raw("floor").and_then(parse_floor),
                price_value: Some(row.extracted("price").unwrap_or(0.0)),
                city_name: row.text("city"),
                location_name: row.text("location"),
                has_bill_of_sale: Some(row.present("document")),
                has_mortgage: Some(row.present("mortgage")),
                company_name: seller.clone(),
                updated_at: row.text_from(&["update_date", "post_date"]),
                url: row.text("url"),
                contact_phone: row.text("phone"),
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

    const HEADERS: [&str; 15] = [
        "listing_id",
        "area",
        "rooms",
        "floor",
        "price",
        "city",
        "location",
        "document",
        "mortgage",
        "url",
        "phone",
        "description",
        "update_date",
        "post_date",
        "seller_name",
    ];

    #[test]
    fn test_mapping_reads_presence_flags() {
        let t = table(
            &HEADERS,
            &[
                &[
                    "e1", "75 kv.m", "3 otaq", "6/12", "140 000 ₼", "Bakı", "Nizami", "Kupça",
                    "", "https://evv.az/e1", "055", "Yeni", "", "2025-08-30", "Elvin",
                ],
                &[
                    "e2", "", "", "", "", "", "", "", "İpoteka var", "", "", "", "2025-09-01",
                    "2025-08-01", "",
                ],
            ],
        );
        let listings = map(&t, &context()).unwrap();
        let first = &listings[0];
        assert_eq!(first.area_value, Some(75.0));
        assert_eq!(first.rooms, Some(3.0));
        assert_eq!(first.floor, Some(6.0));
        assert_eq!(first.price_value, Some(140000.0));
        assert_eq!(first.has_bill_of_sale, Some(true));
        assert_eq!(first.has_mortgage, Some(false));
        assert_eq!(first.updated_at.as_deref(), Some("2025-08-30"));
        assert_eq!(first.company_name.as_deref(), Some("Elvin"));

        let second = &listings[1];
        assert_eq!(second.has_mortgage, Some(true));
        assert_eq!(second.updated_at.as_deref(), Some("2025-09-01"));
        assert_eq!(second.contact_name, None);
    }

    #[test]
    fn test_contact_columns_are_optional() {
        let t = table(
            &HEADERS[..10],
            &[&["e3", "64", "2", "3/9", "98 000", "Bakı", "Xətai", "", "", ""]],
        );
        let listings = map(&t, &context()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].floor, Some(3.0));
        assert_eq!(listings[0].contact_phone, None);
        assert_eq!(listings[0].description, None);
    }

    #[test]
    fn test_requires_mortgage() {
        let t = table(&HEADERS[..8], &[]);
        assert_missing(map(&t, &context()), "mortgage");
    }
}
