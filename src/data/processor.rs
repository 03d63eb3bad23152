//! Data Processor Module
//! Assembles listing batches into Polars frames and concatenates them.

use crate::data::EtlError;
use crate::schema::{ColumnKind, FieldValue, Listing};
use polars::prelude::*;
use std::collections::HashSet;

/// Name of the 1-based row number column prepended in strict output.
pub const RECORD_ID_COLUMN: &str = "record_id";

/// Handles frame assembly and alignment.
pub struct DataProcessor;

impl DataProcessor {
    /// Build a typed frame from listings, one column per requested name.
    ///
    /// Number columns become `Float64`, integers `Int64`, flags `Boolean`, the
    /// rest `String`. Names that are not listing columns are filled with nulls.
    pub fn listings_to_frame(
        listings: &[Listing],
        columns: &[&str],
    ) -> Result<DataFrame, EtlError> {
        let height = listings.len();
        let frame_columns: Vec<Column> = columns
            .iter()
            .map(|&name| match Listing::kind_of(name) {
                Some(kind) => Self::listing_column(listings, name, kind),
                None => Column::full_null(name.into(), height, &DataType::String),
            })
            .collect();

        Ok(DataFrame::new(frame_columns)?)
    }

    fn listing_column(listings: &[Listing], name: &str, kind: ColumnKind) -> Column {
        match kind {
            ColumnKind::Text => {
                let values: Vec<Option<&str>> = listings
                    .iter()
                    .map(|l| match l.field(name) {
                        Some(FieldValue::Text(v)) => v,
                        _ => None,
                    })
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Number => {
                let values: Vec<Option<f64>> = listings
                    .iter()
                    .map(|l| match l.field(name) {
                        Some(FieldValue::Number(v)) => v,
                        _ => None,
                    })
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Integer => {
                let values: Vec<Option<i64>> = listings
                    .iter()
                    .map(|l| match l.field(name) {
                        Some(FieldValue::Integer(v)) => v,
                        _ => None,
                    })
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Flag => {
                let values: Vec<Option<bool>> = listings
                    .iter()
                    .map(|l| match l.field(name) {
                        Some(FieldValue::Flag(v)) => v,
                        _ => None,
                    })
                    .collect();
                Column::new(name.into(), values)
            }
        }
    }

    /// Prepend a 1-based `record_id` column.
    pub fn with_record_id(mut df: DataFrame) -> Result<DataFrame, EtlError> {
        let ids: Vec<i64> = (1..=df.height() as i64).collect();
        df.insert_column(0, Column::new(RECORD_ID_COLUMN.into(), ids))?;
        Ok(df)
    }

    /// Union of column names across frames, in first-seen order, with the
    /// dtype each name first appeared with.
    pub fn union_columns(frames: &[DataFrame]) -> Vec<(String, DataType)> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut union = Vec::new();
        for df in frames {
            for col in df.get_columns() {
                let name = col.name().to_string();
                if seen.insert(name.clone()) {
                    union.push((name, col.dtype().clone()));
                }
            }
        }
        union
    }

    /// Reorder a frame onto `layout`, adding null columns for absent names.
    pub fn align_to(
        mut df: DataFrame,
        layout: &[(String, DataType)],
    ) -> Result<DataFrame, EtlError> {
        let height = df.height();
        for (name, dtype) in layout {
            if df.column(name).is_err() {
                df.with_column(Column::full_null(name.as_str().into(), height, dtype))?;
            }
        }
        let names: Vec<&str> = layout.iter().map(|(name, _)| name.as_str()).collect();
        Ok(df.select(names)?)
    }

    /// Align every frame to the union of their columns, then stack them in order.
    pub fn concat_aligned(frames: Vec<DataFrame>) -> Result<DataFrame, EtlError> {
        if frames.is_empty() {
            return Ok(DataFrame::empty());
        }

        let layout = Self::union_columns(&frames);
        let lazy_frames: Vec<LazyFrame> = frames
            .into_iter()
            .map(|df| Self::align_to(df, &layout).map(|aligned| aligned.lazy()))
            .collect::<Result<_, _>>()?;

        let combined = concat(lazy_frames, UnionArgs::default())?.collect()?;
        Ok(combined)
    }
}
