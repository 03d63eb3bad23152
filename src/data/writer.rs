//! Data Writer Module
//! Exports combined frames as CSV (Polars) and XLSX (rust_xlsxwriter).

use crate::data::EtlError;
use polars::prelude::*;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// Worksheet row capacity, header row included.
pub const XLSX_MAX_ROWS: usize = 1_048_576;
/// Worksheet column capacity.
pub const XLSX_MAX_COLUMNS: usize = 16_384;

pub struct DataWriter;

impl DataWriter {
    /// Write a frame as a headed CSV file, creating parent directories.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), EtlError> {
        Self::ensure_parent(path)?;
        let file = File::create(path)?;
        CsvWriter::new(file).include_header(true).finish(df)?;

        info!(path = %path.display(), rows = df.height(), "wrote CSV");
        Ok(())
    }

    /// Write a frame to the first worksheet of a new workbook.
    ///
    /// Numbers and flags keep their cell types; nulls are left blank.
    pub fn write_xlsx(df: &DataFrame, path: &Path) -> Result<(), EtlError> {
        if df.height() + 1 > XLSX_MAX_ROWS || df.width() > XLSX_MAX_COLUMNS {
            return Err(EtlError::SheetLimit {
                rows: df.height(),
                columns: df.width(),
            });
        }
        Self::ensure_parent(path)?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (idx, column) in df.get_columns().iter().enumerate() {
            let col_idx = idx as u16;
            worksheet.write_string(0, col_idx, column.name().as_str())?;
            Self::write_column(worksheet, col_idx, column)?;
        }

        workbook.save(path)?;
        info!(path = %path.display(), rows = df.height(), "wrote XLSX");
        Ok(())
    }

    fn write_column(
        worksheet: &mut Worksheet,
        col_idx: u16,
        column: &Column,
    ) -> Result<(), EtlError> {
        match column.dtype() {
            DataType::Boolean => {
                for (i, value) in column.bool()?.into_iter().enumerate() {
                    if let Some(v) = value {
                        worksheet.write_boolean(i as u32 + 1, col_idx, v)?;
                    }
                }
            }
            DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8 => {
                let as_float = column.cast(&DataType::Float64)?;
                for (i, value) in as_float.f64()?.into_iter().enumerate() {
                    if let Some(v) = value.filter(|v| v.is_finite()) {
                        worksheet.write_number(i as u32 + 1, col_idx, v)?;
                    }
                }
            }
            DataType::Null => {}
            _ => {
                let as_text = column.cast(&DataType::String)?;
                for (i, value) in as_text.str()?.into_iter().enumerate() {
                    if let Some(v) = value {
                        worksheet.write_string(i as u32 + 1, col_idx, v)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn ensure_parent(path: &Path) -> Result<(), EtlError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
