//! Run summary printed after each combine.

use super::CombineMode;
use crate::schema::{BASELINE_COLUMNS, ORIGINAL_PREFIX};
use crate::sources::SourceBatch;
use polars::prelude::*;
use std::fmt;
use std::path::PathBuf;

/// Non-null coverage of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Completeness {
    pub column: String,
    pub non_null: usize,
    pub percent: f64,
}

#[derive(Debug, Clone)]
pub struct CombineSummary {
    pub mode: CombineMode,
    pub total_rows: usize,
    pub total_columns: usize,
    pub original_columns: usize,
    /// Rows contributed per source, in combine order; failed sources show zero.
    pub rows_per_source: Vec<(String, usize)>,
    pub failures: Vec<(String, String)>,
    pub completeness: Vec<Completeness>,
    pub outputs: Vec<PathBuf>,
}

impl CombineSummary {
    pub fn build(mode: CombineMode, df: &DataFrame, batches: &[SourceBatch]) -> Self {
        let total_rows = df.height();
        let original_columns = df
            .get_column_names()
            .iter()
            .filter(|name| name.starts_with(ORIGINAL_PREFIX))
            .count();

        let completeness = BASELINE_COLUMNS
            .iter()
            .filter_map(|&name| df.column(name).ok())
            .map(|col| {
                let non_null = col.len() - col.null_count();
                let percent = if total_rows > 0 {
                    non_null as f64 / total_rows as f64 * 100.0
                } else {
                    0.0
                };
                Completeness {
                    column: col.name().to_string(),
                    non_null,
                    percent,
                }
            })
            .collect();

        Self {
            mode,
            total_rows,
            total_columns: df.width(),
            original_columns,
            rows_per_source: batches
                .iter()
                .map(|b| (b.source.to_string(), b.height()))
                .collect(),
            failures: batches
                .iter()
                .filter_map(|b| b.error.as_ref().map(|e| (b.source.to_string(), e.clone())))
                .collect(),
            completeness,
            outputs: Vec::new(),
        }
    }
}

impl fmt::Display for CombineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        writeln!(f, "{rule}")?;
        writeln!(f, "COMBINED DATASET SUMMARY ({})", self.mode)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total rows: {}", self.total_rows)?;
        writeln!(f, "Total columns: {}", self.total_columns)?;
        if self.mode.keeps_original_columns() {
            writeln!(f, "Original columns preserved: {}", self.original_columns)?;
        }

        writeln!(f, "\nRows per source:")?;
        for (source, rows) in &self.rows_per_source {
            writeln!(f, "  {source:30}: {rows:>8}")?;
        }

        if !self.failures.is_empty() {
            writeln!(f, "\nErrors: {}", self.failures.len())?;
            for (source, error) in &self.failures {
                writeln!(f, "  - {source}: {error}")?;
            }
        }

        writeln!(f, "\nColumn completeness (non-null values):")?;
        for c in &self.completeness {
            writeln!(f, "  {:30}: {:>8} ({:5.1}%)", c.column, c.non_null, c.percent)?;
        }

        if !self.outputs.is_empty() {
            writeln!(f, "\nOutput files:")?;
            for path in &self.outputs {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}
