//! ipoteka.az exports (XLSX and CSV share one layout apart from the phone column).

use super::{listing_id, MapContext};
use crate::data::parse::parse_floor;
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const XLSX_ID: &str = "ipotekaAz_xlsx";
pub const CSV_ID: &str = "ipotekaAz_csv";

const REQUIRED: [&str; 8] = [
    "announcement_id",
    "area",
    "flat",
    "baxis_sayi",
    "room_count",
    "document_type",
    "repair_type",
    "update_date",
];

pub fn map_xlsx(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    map_with(table, ctx, XLSX_ID, &["phone_cleaned", "phone_number"])
}

pub fn map_csv(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    map_with(table, ctx, CSV_ID, &["phone_number"])
}

fn map_with(
    table: &RawTable,
    ctx: &MapContext,
    source: &str,
    phone_columns: &[&str],
) -> Result<Vec<Listing>, EtlError> {
    table.require(source, &REQUIRED)?;

    let listings = table
        .rows()
        .map(|row| {
            let id = listing_id(&row, "announcement_id");
            Listing {
                url: id.as_ref().map(|id| format!("https://ipoteka.az/elan/{id}")),
                id,
                area_value: row.extracted("area"),
                floor: row.raw("flat").and_then(parse_floor),
                floors: row.number("baxis_sayi"),
                rooms: row.number("room_count"),
                // The export stores the locality in the area column as well.
                city_name: row.text("area"),
                price_value: Some(0.0),
                has_mortgage: Some(false),
                has_bill_of_sale: Some(row.present("document_type")),
                has_repair: Some(row.present("repair_type")),
                updated_at: row.text("update_date"),
                contact_phone: row.text_from(phone_columns),
                contact_name: row.text("user_name"),
                ..ctx.listing(source)
            }
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::*;

    const HEADERS: [&str; 11] = [
        "announcement_id",
        "area",
        "flat",
        "baxis_sayi",
        "room_count",
        "document_type",
        "repair_type",
        "update_date",
        "phone_cleaned",
        "phone_number",
        "user_name",
    ];

    #[test]
    fn test_xlsx_mapping() {
        let t = table(
            &HEADERS,
            &[&[
                "101.0", "65 m²", "5/9", "9", "2", "Kupça", "", "2025-09-01", "", "0501234567",
                "Leyla",
            ]],
        );
        let l = &map_xlsx(&t, &context()).unwrap()[0];
        assert_eq!(l.id.as_deref(), Some("101"));
        assert_eq!(l.url.as_deref(), Some("https://ipoteka.az/elan/101"));
        assert_eq!(l.area_value, Some(65.0));
        assert_eq!(l.city_name.as_deref(), Some("65 m²"));
        assert_eq!(l.floor, Some(5.0));
        assert_eq!(l.floors, Some(9.0));
        assert_eq!(l.rooms, Some(2.0));
        assert_eq!(l.price_value, Some(0.0));
        assert_eq!(l.has_mortgage, Some(false));
        assert_eq!(l.has_bill_of_sale, Some(true));
        assert_eq!(l.has_repair, Some(false));
        // phone_cleaned is empty so the raw phone is used
        assert_eq!(l.contact_phone.as_deref(), Some("0501234567"));
        assert_eq!(l.contact_name.as_deref(), Some("Leyla"));
        assert_eq!(l.source_dataset.as_deref(), Some("ipotekaAz_xlsx"));
    }

    #[test]
    fn test_csv_ignores_cleaned_phone() {
        let t = table(
            &HEADERS,
            &[&["7", "", "", "", "", "", "", "", "994501112233", "", ""]],
        );
        let l = &map_csv(&t, &context()).unwrap()[0];
        assert_eq!(l.contact_phone, None);
        assert_eq!(l.source_dataset.as_deref(), Some("ipotekaAz_csv"));
    }

    #[test]
    fn test_missing_id_leaves_url_empty() {
        let t = table(&HEADERS[..8], &[&["", "50", "", "", "", "", "", ""]]);
        let l = &map_csv(&t, &context()).unwrap()[0];
        assert_eq!(l.id, None);
        assert_eq!(l.url, None);
    }

    #[test]
    fn test_requires_update_date() {
        let t = table(&HEADERS[..7], &[]);
        assert_missing(map_xlsx(&t, &context()), "update_date");
    }
}
