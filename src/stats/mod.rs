//! Stats module - descriptive statistics

mod calculator;

pub use calculator::{GroupStats, NumericKey, StatsCalculator};
