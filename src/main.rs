//! Estate ETL - real-estate listing reconciliation and market charts
//!
//! Reads the per-site listing exports, maps each onto the shared listing
//! schema, writes the combined datasets and renders the descriptive chart set.
//!
//! ```text
//! estate-etl                       # combine (all modes) then charts
//! estate-etl combine --mode strict # one combine mode only
//! estate-etl charts                # charts from an existing strict export
//! ```

mod charts;
mod combine;
mod config;
mod data;
mod schema;
mod sources;
mod stats;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use combine::CombineMode;
use config::PipelineConfig;
use sources::MapContext;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-etl")]
#[command(about = "Combine real-estate listing exports and chart the market")]
#[command(version)]
struct Cli {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Map every source and write the combined datasets
    Combine {
        #[arg(long, value_enum, default_value = "all")]
        mode: ModeArg,
    },
    /// Render the chart set from the strict combined export
    Charts,
    /// Combine in every mode, then render the charts
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Strict,
    Tagged,
    NoLoss,
    All,
}

impl ModeArg {
    fn modes(self) -> Vec<CombineMode> {
        match self {
            ModeArg::Strict => vec![CombineMode::Strict],
            ModeArg::Tagged => vec![CombineMode::Tagged],
            ModeArg::NoLoss => vec![CombineMode::NoLoss],
            ModeArg::All => CombineMode::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = PipelineConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::All) {
        Command::Combine { mode } => run_combine(&config, &mode.modes()),
        Command::Charts => run_charts(&config),
        Command::All => {
            run_combine(&config, &CombineMode::ALL)?;
            run_charts(&config)
        }
    }
}

fn run_combine(config: &PipelineConfig, modes: &[CombineMode]) -> Result<()> {
    let sources = config.enabled_sources();
    info!(
        sources = sources.len(),
        data_dir = %config.data_dir.display(),
        "loading sources"
    );

    let ctx = MapContext::now();
    let batches = combine::load_batches(&sources, &config.data_dir, &ctx);
    let summaries = combine::run(&batches, modes, &config.data_dir)
        .context("Failed to write combined datasets")?;

    for summary in &summaries {
        println!("{summary}");
    }
    Ok(())
}

fn run_charts(config: &PipelineConfig) -> Result<()> {
    info!(charts_dir = %config.charts_dir.display(), "generating charts");
    let report = charts::run(config).context("Failed to generate charts")?;
    println!("{report}");
    Ok(())
}
