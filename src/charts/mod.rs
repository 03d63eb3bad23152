//! Charts module - chart input, data preparation and PNG rendering

mod bins;
mod catalog;
mod dataset;
mod renderer;

pub use dataset::ChartDataset;

use catalog::CATALOG;
use renderer::Target;

use crate::combine::CombineMode;
use crate::config::PipelineConfig;
use crate::data::EtlError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),
    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),
    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
    #[error("Failed to load chart input: {0}")]
    Input(#[from] EtlError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Charts written and skipped in one run.
#[derive(Debug, Clone, Default)]
pub struct ChartReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<&'static str>,
}

impl fmt::Display for ChartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        writeln!(f, "{rule}")?;
        writeln!(f, "CHART GENERATION COMPLETE")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Charts written: {}", self.written.len())?;
        for path in &self.written {
            writeln!(f, "  {}", path.display())?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped (no data): {}", self.skipped.len())?;
            for name in &self.skipped {
                writeln!(f, "  {name}")?;
            }
        }
        Ok(())
    }
}

/// Load the strict combined export and render the whole catalog.
pub fn run(config: &PipelineConfig) -> Result<ChartReport, ChartError> {
    let input = config.data_dir.join(CombineMode::Strict.csv_file());
    let dataset = ChartDataset::load(&input)?;
    render_all(&dataset, &config.charts_dir, config.chart.pixel_size())
}

/// Render every catalog entry into `charts_dir` as `<name>.png`.
///
/// Charts without input are skipped with a warning; any drawing error aborts.
pub fn render_all(
    dataset: &ChartDataset,
    charts_dir: &Path,
    size: (u32, u32),
) -> Result<ChartReport, ChartError> {
    fs::create_dir_all(charts_dir)?;
    let mut report = ChartReport::default();

    for def in CATALOG.iter() {
        let path = charts_dir.join(format!("{}.png", def.name));
        let target = Target { path: &path, size };
        if (def.render)(dataset, target)? {
            info!(chart = def.name, path = %path.display(), "chart saved");
            report.written.push(path);
        } else {
            warn!(chart = def.name, "no data for chart, skipped");
            report.skipped.push(def.name);
        }
    }
    Ok(report)
}
