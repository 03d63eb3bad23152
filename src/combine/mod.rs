//! Combine module - load every source, align the batches and export them per mode

mod mode;
mod summary;

pub use mode::CombineMode;
pub use summary::{CombineSummary, Completeness};

use crate::data::{DataProcessor, DataWriter, EtlError};
use crate::schema::ORIGINAL_PREFIX;
use crate::sources::{run_source, MapContext, SourceBatch, SourceDef};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load and map each source in order. Never fails; broken sources come back empty.
pub fn load_batches(
    sources: &[&SourceDef],
    data_dir: &Path,
    ctx: &MapContext,
) -> Vec<SourceBatch> {
    let batches: Vec<SourceBatch> = sources
        .iter()
        .map(|def| run_source(def, data_dir, ctx))
        .collect();

    let failed = batches.iter().filter(|b| b.error.is_some()).count();
    if failed > 0 {
        warn!(failed, total = batches.len(), "some sources contributed no rows");
    }
    batches
}

/// Frame of one batch in the layout of `mode`.
pub fn batch_frame(batch: &SourceBatch, mode: CombineMode) -> Result<DataFrame, EtlError> {
    let columns = mode.listing_columns();
    let mut df = DataProcessor::listings_to_frame(&batch.listings, &columns)?;

    if mode.keeps_original_columns() && batch.raw.height() == df.height() && df.height() > 0 {
        df.hstack_mut(&batch.raw.prefixed_columns(ORIGINAL_PREFIX))?;
    }
    Ok(df)
}

/// Stack all batches into one frame for `mode`.
///
/// The row count equals the sum of batch heights, rows stay in batch order and
/// every batch is padded with nulls for columns it does not carry.
pub fn combine(batches: &[SourceBatch], mode: CombineMode) -> Result<DataFrame, EtlError> {
    let mut frames = batches
        .iter()
        .map(|batch| batch_frame(batch, mode))
        .collect::<Result<Vec<_>, _>>()?;

    if frames.is_empty() {
        frames.push(DataProcessor::listings_to_frame(&[], &mode.listing_columns())?);
    }

    let combined = DataProcessor::concat_aligned(frames)?;
    if mode.adds_record_id() {
        DataProcessor::with_record_id(combined)
    } else {
        Ok(combined)
    }
}

/// Write the combined frame to the files of `mode` under `data_dir`.
pub fn write_outputs(
    df: &mut DataFrame,
    mode: CombineMode,
    data_dir: &Path,
) -> Result<Vec<PathBuf>, EtlError> {
    let mut outputs = Vec::new();

    let csv_path = data_dir.join(mode.csv_file());
    DataWriter::write_csv(df, &csv_path)?;
    outputs.push(csv_path);

    if let Some(xlsx_file) = mode.xlsx_file() {
        let xlsx_path = data_dir.join(xlsx_file);
        DataWriter::write_xlsx(df, &xlsx_path)?;
        outputs.push(xlsx_path);
    }
    Ok(outputs)
}

/// Combine the loaded batches once per mode and write every output.
pub fn run(
    batches: &[SourceBatch],
    modes: &[CombineMode],
    data_dir: &Path,
) -> Result<Vec<CombineSummary>, EtlError> {
    let mut summaries = Vec::with_capacity(modes.len());

    for &mode in modes {
        info!(%mode, "combining datasets");
        let mut df = combine(batches, mode)?;
        let outputs = write_outputs(&mut df, mode, data_dir)?;

        let mut summary = CombineSummary::build(mode, &df, batches);
        summary.outputs = outputs;
        info!(%mode, rows = summary.total_rows, columns = summary.total_columns, "combined");
        summaries.push(summary);
    }
    Ok(summaries)
}
