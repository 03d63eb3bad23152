//! Data module - source loading, field parsing, frame assembly and export

mod loader;
pub mod parse;
mod processor;
mod table;
mod writer;

pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use table::{RawTable, Row};
pub use writer::DataWriter;

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Workbook has no worksheets: {0}")]
    EmptyWorkbook(PathBuf),
    #[error("Source '{source_id}' is missing required column '{column}'")]
    MissingColumn { source_id: String, column: String },
    #[error("Sheet limit exceeded: {rows} rows x {columns} columns does not fit in a worksheet")]
    SheetLimit { rows: usize, columns: usize },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
