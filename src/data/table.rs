//! Raw Table Module
//! Loosely typed source table: ordered headers with columns of optional strings.

use crate::data::parse::{clean_text, extract_number, normalize_bool, parse_bool, safe_numeric};
use crate::data::EtlError;
use polars::prelude::*;
use std::collections::HashMap;

/// A source dataset as read from disk, before any mapping.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
    index: HashMap<String, usize>,
    height: usize,
}

impl RawTable {
    /// Build from headers and row-major cells. Short rows are padded with nulls,
    /// blank or duplicate headers are renamed so every column stays addressable.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let headers = Self::unique_headers(headers);
        let height = rows.len();
        let mut columns: Vec<Vec<Option<String>>> =
            headers.iter().map(|_| Vec::with_capacity(height)).collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().flatten());
            }
        }

        Self::from_columns(headers, columns)
    }

    /// Convert a polars frame, rendering every column as text.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, EtlError> {
        let mut headers = Vec::with_capacity(df.width());
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let as_text = col.cast(&DataType::String)?;
            let values: Vec<Option<String>> = as_text
                .str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect();
            headers.push(col.name().to_string());
            columns.push(values);
        }

        Ok(Self::from_columns(Self::unique_headers(headers), columns))
    }

    fn from_columns(headers: Vec<String>, columns: Vec<Vec<Option<String>>>) -> Self {
        let height = columns.first().map(|c| c.len()).unwrap_or(0);
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            columns,
            index,
            height,
        }
    }

    fn unique_headers(headers: Vec<String>) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let base = if h.trim().is_empty() {
                    format!("column_{}", i + 1)
                } else {
                    h.trim().to_string()
                };
                let count = seen.entry(base.clone()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    base
                } else {
                    format!("{}_{}", base, *count - 1)
                }
            })
            .collect()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn has(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Fail with [`EtlError::MissingColumn`] for the first absent column.
    pub fn require(&self, source: &str, columns: &[&str]) -> Result<(), EtlError> {
        match columns.iter().find(|c| !self.has(c)) {
            Some(missing) => Err(EtlError::MissingColumn {
                source_id: source.to_string(),
                column: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Cells of a column, if present.
    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice())
    }

    pub fn row(&self, idx: usize) -> Row<'_> {
        Row { table: self, idx }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.height).map(move |idx| self.row(idx))
    }

    /// Every original column as a text column named `{prefix}{header}`.
    pub fn prefixed_columns(&self, prefix: &str) -> Vec<Column> {
        self.headers
            .iter()
            .zip(self.columns.iter())
            .map(|(h, values)| Column::new(format!("{prefix}{h}").into(), values.clone()))
            .collect()
    }
}

/// Borrowed view of one source row.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    table: &'a RawTable,
    idx: usize,
}

impl<'a> Row<'a> {
    /// Zero-based position of the row in its table.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Untrimmed cell, `None` when the column is absent or the cell is null.
    pub fn raw(&self, column: &str) -> Option<&'a str> {
        self.table
            .column(column)
            .and_then(|values| values[self.idx].as_deref())
    }

    /// Trimmed, non-empty text.
    pub fn text(&self, column: &str) -> Option<String> {
        clean_text(self.raw(column))
    }

    /// First non-empty text among candidate columns.
    pub fn text_from(&self, columns: &[&str]) -> Option<String> {
        columns.iter().find_map(|c| self.text(c))
    }

    /// Plain numeric cell (separators and units stripped).
    pub fn number(&self, column: &str) -> Option<f64> {
        self.raw(column).and_then(safe_numeric)
    }

    /// Number extracted from free-form text.
    pub fn extracted(&self, column: &str) -> Option<f64> {
        self.raw(column).and_then(extract_number)
    }

    /// Whether the cell holds any non-blank value.
    pub fn present(&self, column: &str) -> bool {
        self.text(column).is_some()
    }

    /// Tri-state flag: unrecognised values stay null.
    pub fn flag(&self, column: &str) -> Option<bool> {
        self.raw(column).and_then(parse_bool)
    }

    /// Flag with a fallback for null or unrecognised values.
    pub fn flag_or(&self, column: &str, default: bool) -> bool {
        normalize_bool(self.raw(column), default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    fn sample() -> RawTable {
        RawTable::from_rows(
            vec!["id".into(), "area".into(), "flat".into(), "".into(), "area".into()],
            vec![
                cells(&["1", "120 m²", "5/9", "x", "dup"]),
                cells(&["2", "", "3", "", ""]),
                cells(&["3", "64"]),
            ],
        )
    }

    #[test]
    fn test_headers_are_made_unique() {
        let table = sample();
        assert_eq!(table.headers(), &["id", "area", "flat", "column_4", "area_1"]);
        assert_eq!(table.height(), 3);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        let row = table.row(2);
        assert_eq!(row.number("area"), Some(64.0));
        assert_eq!(row.raw("flat"), None);
        assert_eq!(row.raw("area_1"), None);
    }

    #[test]
    fn test_row_accessors() {
        let table = sample();
        let first = table.row(0);
        assert_eq!(first.extracted("area"), Some(120.0));
        assert!(first.present("column_4"));
        assert_eq!(first.text_from(&["missing", "id"]).as_deref(), Some("1"));
        assert_eq!(first.raw("no_such_column"), None);
        assert!(!table.row(1).present("area"));
    }

    #[test]
    fn test_require_reports_first_missing_column() {
        let table = sample();
        assert!(table.require("unvan", &["id", "flat"]).is_ok());
        match table.require("unvan", &["id", "price", "owner"]) {
            Err(EtlError::MissingColumn { source_id, column }) => {
                assert_eq!(source_id, "unvan");
                assert_eq!(column, "price");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_prefixed_columns_keep_values() {
        let table = sample();
        let columns = table.prefixed_columns("orig_");
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[1].name().as_str(), "orig_area");
        let values: Vec<Option<&str>> = columns[1].str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("120 m²"), None, Some("64")]);
    }

    #[test]
    fn test_from_dataframe_renders_text() {
        let df = DataFrame::new(vec![
            Column::new("rooms".into(), vec![Some(2i64), None]),
            Column::new("city".into(), vec![Some("Bakı"), Some("Sumqayıt")]),
        ])
        .unwrap();
        let table = RawTable::from_dataframe(&df).unwrap();
        assert_eq!(table.row(0).raw("rooms"), Some("2"));
        assert_eq!(table.row(1).raw("rooms"), None);
        assert_eq!(table.row(1).text("city").as_deref(), Some("Sumqayıt"));
    }
}
