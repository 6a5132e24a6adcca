use serde::{Deserialize, Serialize};

/// Lower edge of the default histogram range for normalized samples.
pub const DEFAULT_HISTOGRAM_START: f64 = -4.0;
/// Upper edge of the default histogram range for normalized samples.
pub const DEFAULT_HISTOGRAM_END: f64 = 4.0;
/// Default number of histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 40;

/// Fixed-range histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges (inclusive of the left edge, exclusive of the right edge except the last bin).
    pub edges: Vec<f64>,
    /// Counts recorded per bin. Values outside the range land in the end bins.
    pub counts: Vec<u64>,
}

/// Sample count, mean and unbiased variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean (NaN when empty).
    pub mean: f64,
    /// Unbiased variance (NaN with fewer than two values).
    pub variance: f64,
}

/// Quantile summary of one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantiles {
    /// 5th percentile estimate.
    pub q05: f64,
    /// Median estimate.
    pub q50: f64,
    /// 95th percentile estimate.
    pub q95: f64,
}

/// Everything a histogram renderer needs for one character's dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// 1-based character label of the dataset.
    pub label: u64,
    /// Count, mean and variance.
    pub moments: Moments,
    /// Interpolated quantiles.
    pub quantiles: Quantiles,
    /// Histogram over the default range.
    pub histogram: Histogram,
}

impl DatasetSummary {
    /// Summarizes `values` with the default histogram range.
    pub fn from_values(label: u64, values: &[f64]) -> Self {
        Self {
            label,
            moments: moments(values),
            quantiles: quantiles(values),
            histogram: histogram(
                values,
                DEFAULT_HISTOGRAM_START,
                DEFAULT_HISTOGRAM_END,
                DEFAULT_HISTOGRAM_BINS,
            ),
        }
    }
}

/// Buckets `values` into `bins` equal bins over `[start, end]`.
pub fn histogram(values: &[f64], start: f64, end: f64, bins: usize) -> Histogram {
    let step = if bins == 0 {
        1.0
    } else {
        (end - start) / bins as f64
    };
    let edges = (0..=bins).map(|idx| start + idx as f64 * step).collect();
    let mut counts = vec![0u64; bins];
    if bins == 0 {
        return Histogram { edges, counts };
    }
    for value in values.iter().filter(|v| !v.is_nan()) {
        let bin = ((value - start) / step).floor();
        let bin = if bin < 0.0 {
            0
        } else {
            (bin as usize).min(bins - 1)
        };
        counts[bin] += 1;
    }
    Histogram { edges, counts }
}

/// Mean and unbiased variance of `values`.
pub fn moments(values: &[f64]) -> Moments {
    let count = values.len();
    if count == 0 {
        return Moments {
            count,
            mean: f64::NAN,
            variance: f64::NAN,
        };
    }
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = if count < 2 {
        f64::NAN
    } else {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
    };
    Moments {
        count,
        mean,
        variance,
    }
}

/// 5th, 50th and 95th percentiles with linear interpolation.
pub fn quantiles(values: &[f64]) -> Quantiles {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Quantiles {
        q05: percentile(&sorted, 0.05),
        q50: percentile(&sorted, 0.5),
        q95: percentile(&sorted, 0.95),
    }
}

fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = quantile * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
