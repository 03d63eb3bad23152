//! Binning helpers: equal-width histograms and right-closed interval cuts.

/// Equal-width histogram; `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// The last bin is closed on both sides so the maximum is counted. A
    /// constant input spans `value ± 0.5`.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (mut lo, mut hi) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if finite.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(lower edge, upper edge, count)` per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Index of the right-closed interval `(edges[i], edges[i + 1]]` holding `value`.
pub fn cut_index(value: f64, edges: &[f64]) -> Option<usize> {
    edges
        .windows(2)
        .position(|w| value > w[0] && value <= w[1])
}

/// Count of values per right-closed interval; values outside every interval are dropped.
pub fn cut_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0usize; edges.len().saturating_sub(1)];
    for &v in values {
        if let Some(i) = cut_index(v, edges) {
            counts[i] += 1;
        }
    }
    counts
}
