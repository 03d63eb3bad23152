//! February 2025 real-estate dump with its own currency and coordinates.

use super::{listing_id, MapContext};
use crate::data::{EtlError, RawTable};
use crate::schema::{Listing, DEFAULT_CURRENCY};

pub const SOURCE_ID: &str = "real_estate_feb_2025";

pub fn map(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(
        SOURCE_ID,
        &[
            "id",
            "area",
            "rooms",
            "floor",
            "total_floors",
            "price",
            "address",
            "has_repair",
            "source_url",
        ],
    )?;

    let listings = table
        .rows()
        .map(|row| {
            let mut listing = Listing {
                id: listing_id(&row, "id"),
                area_value: row.extracted("area"),
                rooms: row.number("rooms"),
                floor: row.number("floor"),
                floors: row.number("total_floors"),
                price_value: Some(row.number("price").unwrap_or(0.0)),
                price_currency: Some(
                    row.text("currency")
                        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                ),
                city_name: row.text("district"),
                location_name: row.text_from(&["location", "address"]),
                location_full_name: row.text("address"),
                has_repair: Some(row.flag_or("has_repair", false)),
                updated_at: row.text_from(&["updated_at", "listing_date"]),
                url: row.text("source_url"),
                photos: row.text("photos"),
                contact_phone: row.text("contact_phone"),
                latitude: row.number("latitude"),
                longitude: row.number("longitude"),
                description: row.text("description"),
                ..ctx.listing(SOURCE_ID)
            };
            if let Some(created_at) = row.text("created_at") {
                listing.scraped_at = Some(created_at);
            }
            listing
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::*;

    const HEADERS: [&str; 20] = [
        "id",
        "area",
        "rooms",
        "floor",
        "total_floors",
        "price",
        "address",
        "has_repair",
        "source_url",
        "contact_phone",
        "latitude",
        "longitude",
        "description",
        "currency",
        "district",
        "location",
        "updated_at",
        "listing_date",
        "created_at",
        "photos",
    ];

    #[test]
    fn test_mapping_with_optional_columns() {
        let t = table(
            &HEADERS,
            &[
                &[
                    "5", "63 m²", "2", "4", "9", "99000", "Əhmədli m.", "1", "https://re.az/5",
                    "050", "40.39", "49.95", "Metroya yaxın", "USD", "Xətai", "Əhmədli", "",
                    "2025-02-20", "2025-02-25T08:00:00", "a.jpg;b.jpg",
                ],
                &[
                    "6", "", "", "", "", "", "Nərimanov", "yox", "", "", "", "", "", "", "",
                    "", "", "", "", "",
                ],
            ],
        );
        let listings = map(&t, &context()).unwrap();
        let first = &listings[0];
        assert_eq!(first.price_currency.as_deref(), Some("USD"));
        assert_eq!(first.city_name.as_deref(), Some("Xətai"));
        assert_eq!(first.location_name.as_deref(), Some("Əhmədli"));
        assert_eq!(first.location_full_name.as_deref(), Some("Əhmədli m."));
        assert_eq!(first.has_repair, Some(true));
        assert_eq!(first.updated_at.as_deref(), Some("2025-02-20"));
        assert_eq!(first.scraped_at.as_deref(), Some("2025-02-25T08:00:00"));
        assert_eq!(first.photos.as_deref(), Some("a.jpg;b.jpg"));
        assert_eq!(first.latitude, Some(40.39));

        let second = &listings[1];
        assert_eq!(second.price_currency.as_deref(), Some("AZN"));
        assert_eq!(second.location_name.as_deref(), Some("Nərimanov"));
        assert_eq!(second.has_repair, Some(false));
        assert_eq!(second.price_value, Some(0.0));
        assert_eq!(second.scraped_at.as_deref(), Some("2025-11-18T10:00:00"));
    }

    #[test]
    fn test_contact_and_coordinates_are_optional() {
        let t = table(
            &HEADERS[..9],
            &[
                &["7", "80", "3", "2", "5", "120000", "Yasamal", "1", "https://re.az/7"],
                &["8", "55", "2", "1", "4", "", "Binəqədi", "", ""],
            ],
        );
        let listings = map(&t, &context()).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].price_value, Some(120000.0));
        assert_eq!(listings[0].contact_phone, None);
        assert_eq!(listings[0].latitude, None);
        assert_eq!(listings[0].description, None);
        assert_eq!(listings[1].location_name.as_deref(), Some("Binəqədi"));
    }

    #[test]
    fn test_requires_price() {
        let t = table(&HEADERS[..5], &[]);
        assert_missing(map(&t, &context()), "price");
    }
}
