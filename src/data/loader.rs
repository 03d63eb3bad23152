//! Data Loader Module
//! Reads CSV and XLSX listing exports into raw tables using Polars and calamine.

use crate::data::{EtlError, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Largest float rendered without a fractional part when converting XLSX cells.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e15;

/// Loads source files. Stateless; every call reads from disk.
pub struct DataLoader;

impl DataLoader {
    /// Load a source table, routing on the file extension.
    pub fn load_table(path: &Path) -> Result<RawTable, EtlError> {
        if !path.exists() {
            return Err(EtlError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let table = match extension.as_str() {
            "csv" => Self::load_csv_table(path)?,
            "xlsx" | "xlsm" | "xls" => Self::load_xlsx_table(path)?,
            _ => return Err(EtlError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            path = %path.display(),
            rows = table.height(),
            columns = table.headers().len(),
            "loaded source table"
        );
        Ok(table)
    }

    /// Load a CSV with every column kept as text.
    ///
    /// Schema inference is disabled so ids, phone numbers and prices reach the
    /// mappers exactly as written; invalid UTF-8 is replaced rather than rejected.
    /// Rows wider than the header keep their extra cells in unnamed columns.
    pub fn load_csv_table(path: &Path) -> Result<RawTable, EtlError> {
        let widths = Self::scan_widths(path)?;
        if widths.widest > widths.header {
            warn!(
                path = %path.display(),
                rows = widths.ragged_rows,
                extra_columns = widths.widest - widths.header,
                "rows wider than the header, widening"
            );
            return Self::load_ragged_csv(path, widths.widest);
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_encoding(CsvEncoding::LossyUtf8)
            .with_missing_is_null(true)
            .with_truncate_ragged_lines(true)
            .finish()?
            .collect()?;

        RawTable::from_dataframe(&df)
    }

    /// Header width and the widest data row of a CSV.
    fn scan_widths(path: &Path) -> Result<CsvWidths, EtlError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let header = reader.byte_headers()?.len();

        let mut widths = CsvWidths {
            header,
            widest: header,
            ragged_rows: 0,
        };
        let mut record = csv::ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            if record.len() > header {
                widths.ragged_rows += 1;
                widths.widest = widths.widest.max(record.len());
            }
        }
        Ok(widths)
    }

    /// Read a ragged CSV cell by cell, padding the header with blank names.
    fn load_ragged_csv(path: &Path, width: usize) -> Result<RawTable, EtlError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let mut headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        headers.resize(width, String::new());

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let cells: Vec<Option<String>> = record?
                .iter()
                .map(|cell| {
                    let text = String::from_utf8_lossy(cell);
                    (!text.is_empty()).then(|| text.into_owned())
                })
                .collect();
            rows.push(cells);
        }

        Ok(RawTable::from_rows(headers, rows))
    }

    /// Load a CSV with inferred column types.
    pub fn load_csv(path: &Path) -> Result<DataFrame, EtlError> {
        if !path.exists() {
            return Err(EtlError::NotFound(path.to_path_buf()));
        }

        // Lazy scan then collect; malformed cells become nulls.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Load the first worksheet of a workbook, using the first row as headers.
    pub fn load_xlsx_table(path: &Path) -> Result<RawTable, EtlError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| EtlError::EmptyWorkbook(path.to_path_buf()))??;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| Self::cell_text(cell).unwrap_or_default())
                .collect(),
            None => return Ok(RawTable::default()),
        };

        let body: Vec<Vec<Option<String>>> = rows
            .map(|row| row.iter().map(Self::cell_text).collect())
            .collect();

        Ok(RawTable::from_rows(headers, body))
    }

    /// Render a spreadsheet cell as text; blanks and error cells are null.
    pub fn cell_text(cell: &Data) -> Option<String> {
        let text = match cell {
            Data::Empty | Data::Error(_) => return None,
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => Self::float_text(*f),
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
                None => Self::float_text(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        };

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn float_text(value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
            format!("{}", value as i64)
        } else {
            value.to_string()
        }
    }
}

struct CsvWidths {
    header: usize,
    widest: usize,
    ragged_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_csv_table_keeps_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        fs::write(
            &path,
            "id,price,phone\n00123,\"85,000\",+994 50 111 22 33\n2,,055\n",
        )
        .unwrap();

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.headers(), &["id", "price", "phone"]);

        let first = table.row(0);
        assert_eq!(first.raw("id"), Some("00123"));
        assert_eq!(first.number("price"), Some(85000.0));
        assert_eq!(table.row(1).raw("price"), None);
        assert_eq!(table.row(1).raw("phone"), Some("055"));
    }

    #[test]
    fn test_load_csv_table_widens_ragged_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "id,price\n1,100,Bakı,extra\n2,200\n3\n").unwrap();

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(table.height(), 3);
        assert_eq!(table.headers(), &["id", "price", "column_3", "column_4"]);
        assert_eq!(table.row(0).raw("column_3"), Some("Bakı"));
        assert_eq!(table.row(0).raw("column_4"), Some("extra"));
        assert_eq!(table.row(1).raw("price"), Some("200"));
        assert_eq!(table.row(1).raw("column_3"), None);
        assert_eq!(table.row(2).raw("price"), None);

        let orig = table.prefixed_columns("orig_");
        assert_eq!(orig[3].name().as_str(), "orig_column_4");
    }

    #[test]
    fn test_load_csv_table_lossy_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        let mut bytes = b"city,rooms\n".to_vec();
        bytes.extend_from_slice(&[b'B', 0xff, b'k', b',', b'3', b'\n']);
        fs::write(&path, bytes).unwrap();

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(table.height(), 1);
        assert_eq!(table.row(0).number("rooms"), Some(3.0));
        assert!(table.row(0).text("city").unwrap().starts_with('B'));
    }

    #[test]
    fn test_load_xlsx_table_renders_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unvan.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "area").unwrap();
        sheet.write_string(0, 2, "vip").unwrap();
        sheet.write_number(1, 0, 4321.0).unwrap();
        sheet.write_string(1, 1, "75 m²").unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        sheet.write_number(2, 0, 4322.0).unwrap();
        sheet.write_number(2, 1, 64.5).unwrap();
        workbook.save(&path).unwrap();

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.row(0).raw("id"), Some("4321"));
        assert_eq!(table.row(0).extracted("area"), Some(75.0));
        assert_eq!(table.row(0).flag("vip"), Some(true));
        assert_eq!(table.row(1).raw("area"), Some("64.5"));
        assert_eq!(table.row(1).raw("vip"), None);
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            DataLoader::load_table(&missing),
            Err(EtlError::NotFound(_))
        ));

        let odd = dir.path().join("listings.json");
        fs::write(&odd, "{}").unwrap();
        assert!(matches!(
            DataLoader::load_table(&odd),
            Err(EtlError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(DataLoader::cell_text(&Data::Float(12.0)).as_deref(), Some("12"));
        assert_eq!(DataLoader::cell_text(&Data::Float(12.25)).as_deref(), Some("12.25"));
        assert_eq!(DataLoader::cell_text(&Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(DataLoader::cell_text(&Data::String("  ".into())), None);
        assert_eq!(DataLoader::cell_text(&Data::Empty), None);
    }
}
