//! Pipeline configuration loaded from an optional JSON file.

use crate::sources::{find_source, SourceDef, SOURCES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unknown source id in disabled_sources: {0}")]
    UnknownSource(String),
    #[error("Invalid chart size: {0}")]
    InvalidChartSize(String),
}

/// Output image geometry, in inches at a fixed DPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_in: 16.0,
            height_in: 10.0,
            dpi: 100,
        }
    }
}

impl ChartConfig {
    /// Pixel size of a rendered chart.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the source exports and the combined outputs.
    pub data_dir: PathBuf,
    pub charts_dir: PathBuf,
    pub chart: ChartConfig,
    /// Source ids skipped during combining.
    pub disabled_sources: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            charts_dir: PathBuf::from("charts"),
            chart: ChartConfig::default(),
            disabled_sources: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Config from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(unknown) = self
            .disabled_sources
            .iter()
            .find(|id| find_source(id).is_none())
        {
            return Err(ConfigError::UnknownSource(unknown.clone()));
        }

        let chart = &self.chart;
        if !(chart.width_in > 0.0 && chart.height_in > 0.0 && chart.dpi > 0) {
            return Err(ConfigError::InvalidChartSize(format!(
                "{}x{} in at {} dpi",
                chart.width_in, chart.height_in, chart.dpi
            )));
        }
        Ok(())
    }

    /// Registered sources minus the disabled ones, in registry order.
    pub fn enabled_sources(&self) -> Vec<&'static SourceDef> {
        SOURCES
            .iter()
            .filter(|s| !self.disabled_sources.iter().any(|d| d == s.id))
            .collect()
    }
}
