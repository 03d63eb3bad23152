//! Statistics Calculator Module
//! Descriptive statistics, grouped aggregation and value counts.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Statistics for a single group of values.
#[derive(Debug, Clone)]
pub struct GroupStats {
    pub group_name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    /// Smallest of the most frequent values.
    pub mode: f64,
    pub p95: f64,
    pub p05: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            variance: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            mode: f64::NAN,
            p95: f64::NAN,
            p05: f64::NAN,
        }
    }
}

/// Totally ordered numeric group key (room counts, floor numbers).
#[derive(Debug, Clone, Copy)]
pub struct NumericKey(pub f64);

impl PartialEq for NumericKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for NumericKey {}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for NumericKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats::default();
        }

        let sorted = Self::sorted(values);

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std = variance.sqrt();

        GroupStats {
            group_name: String::new(),
            count: n,
            mean,
            median,
            std,
            variance,
            min: sorted[0],
            max: sorted[n - 1],
            mode: Self::mode_of_sorted(&sorted),
            p95: Self::percentile(&sorted, 95.0),
            p05: Self::percentile(&sorted, 5.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Quantile `q` in `[0, 1]` of unsorted values.
    pub fn quantile(values: &[f64], q: f64) -> f64 {
        Self::percentile(&Self::sorted(values), q * 100.0)
    }

    /// Smallest most frequent value.
    pub fn mode(values: &[f64]) -> f64 {
        Self::mode_of_sorted(&Self::sorted(values))
    }

    fn mode_of_sorted(sorted: &[f64]) -> f64 {
        let mut best = f64::NAN;
        let mut best_run = 0usize;
        let mut i = 0;
        while i < sorted.len() {
            let mut j = i + 1;
            while j < sorted.len() && sorted[j] == sorted[i] {
                j += 1;
            }
            // strict comparison keeps the smallest value among ties
            if j - i > best_run {
                best_run = j - i;
                best = sorted[i];
            }
            i = j;
        }
        best
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        sorted
    }

    /// Descriptive statistics per key, ordered by key.
    pub fn group_stats<K>(pairs: impl IntoIterator<Item = (K, f64)>) -> Vec<(K, GroupStats)>
    where
        K: Ord + fmt::Display,
    {
        let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        for (key, value) in pairs {
            groups.entry(key).or_default().push(value);
        }

        groups
            .into_iter()
            .map(|(key, values)| {
                let mut stats = Self::compute_descriptive_stats(&values);
                stats.group_name = key.to_string();
                (key, stats)
            })
            .collect()
    }

    /// Occurrences per key, most frequent first; ties ordered by key.
    pub fn value_counts<K: Ord>(keys: impl IntoIterator<Item = K>) -> Vec<(K, usize)> {
        let mut counts: BTreeMap<K, usize> = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }

        let mut counts: Vec<(K, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
