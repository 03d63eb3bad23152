//! Sources module - per-export mappers onto the listing schema
//!
//! Each mapper receives the raw table of one export and returns exactly one
//! [`Listing`] per source row, or an error when a required column is absent.

mod bina;
mod binalar;
mod binam;
mod emlak;
mod evv;
mod ipoteka;
mod mulk;
mod myhome;
mod ofis;
mod real_estate;
mod unvan;
mod villa;
mod yeniemlak;

use crate::data::parse::normalize_id;
use crate::data::{DataLoader, EtlError, RawTable, Row};
use crate::schema::Listing;
use std::path::Path;
use tracing::{info, warn};

/// Signature shared by every source mapper.
pub type MapFn = fn(&RawTable, &MapContext) -> Result<Vec<Listing>, EtlError>;

/// Values shared by all mappers within one run.
#[derive(Debug, Clone)]
pub struct MapContext {
    /// Run timestamp, ISO-8601 local time.
    pub scraped_at: String,
}

impl MapContext {
    pub fn new(scraped_at: impl Into<String>) -> Self {
        Self {
            scraped_at: scraped_at.into(),
        }
    }

    /// Context stamped with the current local time.
    pub fn now() -> Self {
        Self::new(
            chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        )
    }

    /// Fresh listing with the shared defaults for `source`.
    pub fn listing(&self, source: &str) -> Listing {
        Listing::stamped(source, &self.scraped_at)
    }
}

/// A registered source export.
#[derive(Clone, Copy)]
pub struct SourceDef {
    pub id: &'static str,
    pub file: &'static str,
    pub map: MapFn,
}

impl std::fmt::Debug for SourceDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDef")
            .field("id", &self.id)
            .field("file", &self.file)
            .finish()
    }
}

/// Every known export, in combine order.
pub const SOURCES: [SourceDef; 16] = [
    SourceDef {
        id: bina::SALE_ID,
        file: "bina_sale_20251117_213934.csv",
        map: bina::map_sale,
    },
    SourceDef {
        id: ipoteka::XLSX_ID,
        file: "ipotekaAz.xlsx",
        map: ipoteka::map_xlsx,
    },
    SourceDef {
        id: ipoteka::CSV_ID,
        file: "ipotekaAz.csv",
        map: ipoteka::map_csv,
    },
    SourceDef {
        id: binalar::SOURCE_ID,
        file: "binalar_listings.csv",
        map: binalar::map,
    },
    SourceDef {
        id: yeniemlak::XLSX_ID,
        file: "yeniemlak.xlsx",
        map: yeniemlak::map_xlsx,
    },
    SourceDef {
        id: yeniemlak::CSV_ID,
        file: "yeniemlakAz.csv",
        map: yeniemlak::map_csv,
    },
    SourceDef {
        id: myhome::SOURCE_ID,
        file: "myhome_listings_20250929_003143.csv",
        map: myhome::map,
    },
    SourceDef {
        id: unvan::SOURCE_ID,
        file: "unvan.xlsx",
        map: unvan::map,
    },
    SourceDef {
        id: mulk::SOURCE_ID,
        file: "mulk_data_20250929_143644.csv",
        map: mulk::map,
    },
    SourceDef {
        id: emlak::SOURCE_ID,
        file: "emlakAz.xlsx",
        map: emlak::map,
    },
    SourceDef {
        id: ofis::SOURCE_ID,
        file: "ofis_listings.csv",
        map: ofis::map,
    },
    SourceDef {
        id: real_estate::SOURCE_ID,
        file: "real_estate_data_25_feb_2025.csv",
        map: real_estate::map,
    },
    SourceDef {
        id: villa::SOURCE_ID,
        file: "villa_az_complete_dataset.csv",
        map: villa::map,
    },
    SourceDef {
        id: evv::SOURCE_ID,
        file: "evv_az_listings.csv",
        map: evv::map,
    },
    SourceDef {
        id: binam::SOURCE_ID,
        file: "binam_listings_1758793717.csv",
        map: binam::map,
    },
    SourceDef {
        id: bina::XLSX_ID,
        file: "bina.xlsx",
        map: bina::map_xlsx,
    },
];

/// Look up a registered source by id.
pub fn find_source(id: &str) -> Option<&'static SourceDef> {
    SOURCES.iter().find(|s| s.id == id)
}

/// Mapped rows of one source together with the raw table they came from.
#[derive(Debug)]
pub struct SourceBatch {
    pub source: &'static str,
    pub listings: Vec<Listing>,
    pub raw: RawTable,
    /// Load or mapping failure; the batch is empty when set.
    pub error: Option<String>,
}

impl SourceBatch {
    pub fn failed(source: &'static str, error: String) -> Self {
        Self {
            source,
            listings: Vec::new(),
            raw: RawTable::default(),
            error: Some(error),
        }
    }

    pub fn height(&self) -> usize {
        self.listings.len()
    }
}

/// Load and map one source. Failures are logged and yield an empty batch.
pub fn run_source(def: &SourceDef, data_dir: &Path, ctx: &MapContext) -> SourceBatch {
    let path = data_dir.join(def.file);
    info!(source = def.id, path = %path.display(), "processing source");

    let result = DataLoader::load_table(&path)
        .and_then(|raw| (def.map)(&raw, ctx).map(|listings| (raw, listings)));

    match result {
        Ok((raw, listings)) => {
            info!(source = def.id, rows = listings.len(), "mapped source");
            SourceBatch {
                source: def.id,
                listings,
                raw,
                error: None,
            }
        }
        Err(e) => {
            warn!(source = def.id, error = %e, "source failed, contributing no rows");
            SourceBatch::failed(def.id, e.to_string())
        }
    }
}

/// Normalised identifier from `column`.
pub(crate) fn listing_id(row: &Row<'_>, column: &str) -> Option<String> {
    row.raw(column).and_then(normalize_id)
}

/// 1-based row number, used where an export carries no identifier.
pub(crate) fn row_number_id(row: &Row<'_>) -> String {
    (row.index() + 1).to_string()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_registry_ids_are_unique() {
        let ids: HashSet<&str> = SOURCES.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SOURCES.len());
        assert_eq!(SOURCES[0].id, "bina_sale");
        assert_eq!(SOURCES[15].id, "bina_xlsx");
        assert_eq!(find_source("myhome").map(|s| s.file), Some("myhome_listings_20250929_003143.csv"));
        assert!(find_source("zillow").is_none());
    }

    #[test]
    fn test_run_source_missing_file_yields_empty_batch() {
        let dir = tempdir().unwrap();
        let def = find_source("unvan").unwrap();
        let batch = run_source(def, dir.path(), &context());
        assert_eq!(batch.height(), 0);
        assert!(batch.error.as_deref().unwrap().contains("unvan.xlsx"));
    }

    #[test]
    fn test_run_source_missing_column_yields_empty_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("binalar_listings.csv"), "id,area\n1,50\n").unwrap();
        let batch = run_source(find_source("binalar_listings").unwrap(), dir.path(), &context());
        assert_eq!(batch.height(), 0);
        assert!(batch.error.as_deref().unwrap().contains("missing required column"));
    }

    #[test]
    fn test_run_source_maps_every_row() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("binalar_listings.csv"),
            "id,area,rooms,floor,price_raw,address,url\n\
             11,80,3,4/9,120000,Nərimanov,https://binalar.az/11\n\
             12,,2,,,Yasamal,\n",
        )
        .unwrap();
        let batch = run_source(find_source("binalar_listings").unwrap(), dir.path(), &context());
        assert!(batch.error.is_none());
        assert_eq!(batch.height(), 2);
        assert_eq!(batch.raw.height(), 2);
        assert_eq!(batch.listings[1].price_value, Some(0.0));
    }

    #[test]
    fn test_run_source_without_contact_columns_keeps_rows() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("real_estate_data_25_feb_2025.csv"),
            "id,area,rooms,floor,total_floors,price,address,has_repair,source_url\n\
             1,60,2,3,9,98000,Xətai,1,https://re.az/1\n\
             2,75,3,5,12,134000,Yasamal,0,https://re.az/2\n\
             3,,,,,,Nəsimi,,\n",
        )
        .unwrap();
        let batch = run_source(
            find_source("real_estate_feb_2025").unwrap(),
            dir.path(),
            &context(),
        );
        assert!(batch.error.is_none());
        assert_eq!(batch.height(), 3);
        assert_eq!(batch.listings[1].price_value, Some(134000.0));
        assert_eq!(batch.listings[0].description, None);
    }

    #[test]
    fn test_id_helpers() {
        let t = table(&["id"], &[&["77.0"], &[""]]);
        assert_eq!(listing_id(&t.row(0), "id").as_deref(), Some("77"));
        assert_eq!(listing_id(&t.row(1), "id"), None);
        assert_eq!(row_number_id(&t.row(1)), "2");
    }
}
