//! Combine modes: how much of each source survives into the combined output.

use crate::schema::{BASELINE_COLUMNS, EXTENDED_COLUMNS};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Baseline columns only, prefixed by a 1-based `record_id`.
    Strict,
    /// Baseline plus the extended contact/description/source columns.
    Tagged,
    /// Tagged layout plus every original source column under `orig_`.
    NoLoss,
}

impl CombineMode {
    pub const ALL: [CombineMode; 3] = [CombineMode::Strict, CombineMode::Tagged, CombineMode::NoLoss];

    /// Listing columns written by this mode, in order.
    pub fn listing_columns(&self) -> Vec<&'static str> {
        match self {
            CombineMode::Strict => BASELINE_COLUMNS.to_vec(),
            CombineMode::Tagged | CombineMode::NoLoss => BASELINE_COLUMNS
                .iter()
                .chain(EXTENDED_COLUMNS.iter())
                .copied()
                .collect(),
        }
    }

    pub fn keeps_original_columns(&self) -> bool {
        matches!(self, CombineMode::NoLoss)
    }

    pub fn adds_record_id(&self) -> bool {
        matches!(self, CombineMode::Strict)
    }

    pub fn csv_file(&self) -> &'static str {
        match self {
            CombineMode::Strict => "combined_real_estate_bina_format.csv",
            CombineMode::Tagged => "combined_real_estate_dataset.csv",
            CombineMode::NoLoss => "combined_real_estate_master.csv",
        }
    }

    pub fn xlsx_file(&self) -> Option<&'static str> {
        match self {
            CombineMode::Strict => Some("combined_real_estate_bina_format.xlsx"),
            CombineMode::Tagged => None,
            CombineMode::NoLoss => Some("combined_real_estate_master.xlsx"),
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CombineMode::Strict => "strict",
            CombineMode::Tagged => "tagged",
            CombineMode::NoLoss => "no-loss",
        };
        write!(f, "{name}")
    }
}
