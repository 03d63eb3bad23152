//! yeniemlak.az exports: a bare link/phone XLSX and a richer CSV with loose headers.

use super::{listing_id, row_number_id, MapContext};
use crate::data::parse::{ensure_scheme, parse_floor};
use crate::data::{EtlError, RawTable};
use crate::schema::Listing;

pub const XLSX_ID: &str = "yeniemlak_xlsx";
pub const CSV_ID: &str = "yeniemlakAz_csv";

/// The XLSX export has no identifier column; rows are numbered from 1.
pub fn map_xlsx(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    table.require(XLSX_ID, &["link"])?;

    let listings = table
        .rows()
        .map(|row| Listing {
            id: Some(row_number_id(&row)),
            url: row.raw("link").map(ensure_scheme),
            contact_phone: row.text("phone_number"),
            leased: None,
            ..ctx.listing(XLSX_ID)
        })
        .collect();

    Ok(listings)
}

/// Every column of the CSV export is optional.
pub fn map_csv(table: &RawTable, ctx: &MapContext) -> Result<Vec<Listing>, EtlError> {
    let has_doc_type = table.has("doc_type");

    let listings = table
        .rows()
        .map(|row| Listing {
            id: listing_id(&row, "id").or_else(|| Some(row_number_id(&row))),
            price_value: Some(row.number("price").unwrap_or(0.0)),
            rooms: row.number("room_count"),
            area_value: row.number("area"),
            floor: row
                .raw("flat")
                .and_then(parse_floor)
                .or_else(|| row.raw("floor").and_then(parse_floor)),
            location_name: row.text("address"),
            location_full_name: row.text("address_2"),
            url: row.text("href").map(|href| ensure_scheme(&href)),
            updated_at: row.text("date"),
            contact_phone: row.text("owner_number"),
            contact_name: row.text("owner_name"),
            description: row.text("description"),
            has_bill_of_sale: Some(has_doc_type && row.present("doc_type")),
            ..ctx.listing(CSV_ID)
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::*;

    #[test]
    fn test_xlsx_numbers_rows_and_adds_scheme() {
        let t = table(
            &["link", "phone_number"],
            &[
                &["yeniemlak.az/elan/1", "050"],
                &["https://yeniemlak.az/elan/2", ""],
            ],
        );
        let listings = map_xlsx(&t, &context()).unwrap();
        assert_eq!(listings[0].id.as_deref(), Some("1"));
        assert_eq!(listings[0].url.as_deref(), Some("https://yeniemlak.az/elan/1"));
        assert_eq!(listings[1].id.as_deref(), Some("2"));
        assert_eq!(listings[1].url.as_deref(), Some("https://yeniemlak.az/elan/2"));
        assert_eq!(listings[1].contact_phone, None);
        assert_eq!(listings[0].leased, None);
    }

    #[test]
    fn test_xlsx_phone_is_optional() {
        let t = table(&["link"], &[&["yeniemlak.az/elan/3"]]);
        let listings = map_xlsx(&t, &context()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].contact_phone, None);
    }

    #[test]
    fn test_xlsx_requires_link() {
        let t = table(&["phone_number"], &[]);
        assert_missing(map_xlsx(&t, &context()), "link");
    }

    #[test]
    fn test_csv_full_columns() {
        let t = table(
            &[
                "id", "price", "room_count", "area", "flat", "address", "address_2", "href",
                "date", "owner_number", "owner_name", "description", "doc_type",
            ],
            &[&[
                "900", "95000", "2", "58", "3/5", "Sabunçu", "Bakıxanov", "yeniemlak.az/900",
                "12.09.2025", "070", "Rəşad", "Yeni tikili", "Kupça",
            ]],
        );
        let l = &map_csv(&t, &context()).unwrap()[0];
        assert_eq!(l.id.as_deref(), Some("900"));
        assert_eq!(l.price_value, Some(95000.0));
        assert_eq!(l.floor, Some(3.0));
        assert_eq!(l.location_full_name.as_deref(), Some("Bakıxanov"));
        assert_eq!(l.url.as_deref(), Some("https://yeniemlak.az/900"));
        assert_eq!(l.contact_name.as_deref(), Some("Rəşad"));
        assert_eq!(l.has_bill_of_sale, Some(true));
    }

    #[test]
    fn test_csv_sparse_columns() {
        let t = table(&["floor", "area"], &[&["7", "44"], &["", ""]]);
        let listings = map_csv(&t, &context()).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id.as_deref(), Some("1"));
        assert_eq!(listings[0].floor, Some(7.0));
        assert_eq!(listings[0].price_value, Some(0.0));
        assert_eq!(listings[0].has_bill_of_sale, Some(false));
        assert_eq!(listings[0].url, None);
        assert_eq!(listings[1].id.as_deref(), Some("2"));
        assert_eq!(listings[1].area_value, None);
    }
}
