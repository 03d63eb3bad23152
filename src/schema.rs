//! Listing Schema Module
//! The baseline listing record every source is mapped onto, and its column layout.

/// Baseline schema, in output order (the bina.az sale export layout).
pub const BASELINE_COLUMNS: [&str; 30] = [
    "id",
    "area_value",
    "area_units",
    "leased",
    "floor",
    "floors",
    "rooms",
    "city_id",
    "city_name",
    "location_id",
    "location_name",
    "location_full_name",
    "price_value",
    "price_currency",
    "company_id",
    "company_name",
    "company_target_type",
    "has_mortgage",
    "has_bill_of_sale",
    "has_repair",
    "paid_daily",
    "is_business",
    "vipped",
    "featured",
    "updated_at",
    "path",
    "photos_count",
    "photos",
    "url",
    "scraped_at",
];

/// Columns appended after the baseline in the tagged and no-loss layouts.
pub const EXTENDED_COLUMNS: [&str; 7] = [
    "source_dataset",
    "contact_phone",
    "contact_name",
    "description",
    "latitude",
    "longitude",
    "property_type",
];

/// Prefix applied to every original source column in no-loss output.
pub const ORIGINAL_PREFIX: &str = "orig_";

pub const DEFAULT_AREA_UNITS: &str = "m²";
pub const DEFAULT_CURRENCY: &str = "AZN";

/// Storage kind of a listing column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Integer,
    Flag,
}

/// Borrowed value of a single listing field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
    Integer(Option<i64>),
    Flag(Option<bool>),
}

/// One listing in the baseline schema plus the extended columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub id: Option<String>,
    pub area_value: Option<f64>,
    pub area_units: Option<String>,
    pub leased: Option<bool>,
    pub floor: Option<f64>,
    pub floors: Option<f64>,
    pub rooms: Option<f64>,
    pub city_id: Option<String>,
    pub city_name: Option<String>,
    pub location_id: Option<String>,
    pub location_name: Option<String>,
    pub location_full_name: Option<String>,
    pub price_value: Option<f64>,
    pub price_currency: Option<String>,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub company_target_type: Option<String>,
    pub has_mortgage: Option<bool>,
    pub has_bill_of_sale: Option<bool>,
    pub has_repair: Option<bool>,
    pub paid_daily: Option<bool>,
    pub is_business: Option<bool>,
    pub vipped: Option<bool>,
    pub featured: Option<bool>,
    pub updated_at: Option<String>,
    pub path: Option<String>,
    pub photos_count: Option<i64>,
    pub photos: Option<String>,
    pub url: Option<String>,
    pub scraped_at: Option<String>,

    pub source_dataset: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: Option<String>,
}

impl Listing {
    /// A listing pre-filled with the defaults shared by every mapped source.
    pub fn stamped(source: &str, scraped_at: &str) -> Self {
        Self {
            area_units: Some(DEFAULT_AREA_UNITS.to_string()),
            price_currency: Some(DEFAULT_CURRENCY.to_string()),
            leased: Some(false),
            scraped_at: Some(scraped_at.to_string()),
            source_dataset: Some(source.to_string()),
            ..Default::default()
        }
    }

    /// Kind of a known column, `None` for names outside the listing layout.
    pub fn kind_of(column: &str) -> Option<ColumnKind> {
        let kind = match column {
            "area_value" | "floor" | "floors" | "rooms" | "price_value" | "latitude"
            | "longitude" => ColumnKind::Number,
            "photos_count" => ColumnKind::Integer,
            "leased" | "has_mortgage" | "has_bill_of_sale" | "has_repair" | "paid_daily"
            | "is_business" | "vipped" | "featured" => ColumnKind::Flag,
            "id" | "area_units" | "city_id" | "city_name" | "location_id" | "location_name"
            | "location_full_name" | "price_currency" | "company_id" | "company_name"
            | "company_target_type" | "updated_at" | "path" | "photos" | "url" | "scraped_at"
            | "source_dataset" | "contact_phone" | "contact_name" | "description"
            | "property_type" => ColumnKind::Text,
            _ => return None,
        };
        Some(kind)
    }

    /// Value of a named column; `None` when the name is not a listing column.
    pub fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        use FieldValue::{Flag, Integer, Number, Text};

        let value = match column {
            "id" => Text(self.id.as_deref()),
            "area_value" => Number(self.area_value),
            "area_units" => Text(self.area_units.as_deref()),
            "leased" => Flag(self.leased),
            "floor" => Number(self.floor),
            "floors" => Number(self.floors),
            "rooms" => Number(self.rooms),
            "city_id" => Text(self.city_id.as_deref()),
            "city_name" => Text(self.city_name.as_deref()),
            "location_id" => Text(self.location_id.as_deref()),
            "location_name" => Text(self.location_name.as_deref()),
            "location_full_name" => Text(self.location_full_name.as_deref()),
            "price_value" => Number(self.price_value),
            "price_currency" => Text(self.price_currency.as_deref()),
            "company_id" => Text(self.company_id.as_deref()),
            "company_name" => Text(self.company_name.as_deref()),
            "company_target_type" => Text(self.company_target_type.as_deref()),
            "has_mortgage" => Flag(self.has_mortgage),
            "has_bill_of_sale" => Flag(self.has_bill_of_sale),
            "has_repair" => Flag(self.has_repair),
            "paid_daily" => Flag(self.paid_daily),
            "is_business" => Flag(self.is_business),
            "vipped" => Flag(self.vipped),
            "featured" => Flag(self.featured),
            "updated_at" => Text(self.updated_at.as_deref()),
            "path" => Text(self.path.as_deref()),
            "photos_count" => Integer(self.photos_count),
            "photos" => Text(self.photos.as_deref()),
            "url" => Text(self.url.as_deref()),
            "scraped_at" => Text(self.scraped_at.as_deref()),
            "source_dataset" => Text(self.source_dataset.as_deref()),
            "contact_phone" => Text(self.contact_phone.as_deref()),
            "contact_name" => Text(self.contact_name.as_deref()),
            "description" => Text(self.description.as_deref()),
            "latitude" => Number(self.latitude),
            "longitude" => Number(self.longitude),
            "property_type" => Text(self.property_type.as_deref()),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layout_column_is_addressable() {
        let listing = Listing::default();
        for column in BASELINE_COLUMNS.iter().chain(EXTENDED_COLUMNS.iter()) {
            assert!(listing.field(column).is_some(), "{column} has no field");
            assert!(Listing::kind_of(column).is_some(), "{column} has no kind");
        }
        assert!(listing.field("orig_price").is_none());
    }

    #[test]
    fn test_field_kind_matches_value_variant() {
        let listing = Listing::default();
        for column in BASELINE_COLUMNS.iter().chain(EXTENDED_COLUMNS.iter()) {
            let kind = Listing::kind_of(column).unwrap();
            let matches = matches!(
                (kind, listing.field(column).unwrap()),
                (ColumnKind::Text, FieldValue::Text(_))
                    | (ColumnKind::Number, FieldValue::Number(_))
                    | (ColumnKind::Integer, FieldValue::Integer(_))
                    | (ColumnKind::Flag, FieldValue::Flag(_))
            );
            assert!(matches, "{column} kind disagrees with its value");
        }
    }

    #[test]
    fn test_stamped_defaults() {
        let listing = Listing::stamped("mulk", "2025-09-29T14:36:44");
        assert_eq!(listing.area_units.as_deref(), Some("m²"));
        assert_eq!(listing.price_currency.as_deref(), Some("AZN"));
        assert_eq!(listing.leased, Some(false));
        assert_eq!(listing.source_dataset.as_deref(), Some("mulk"));
        assert_eq!(listing.scraped_at.as_deref(), Some("2025-09-29T14:36:44"));
        assert_eq!(listing.field("price_value"), Some(FieldValue::Number(None)));
    }
}
