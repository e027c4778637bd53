//! Descriptive statistics for numeric columns.

use serde::Serialize;

/// Summary of one numeric column, computed over its non-missing values.
///
/// Serializes with the keys `count`, `mean`, `std`, `min`, `25%`, `50%`, `75%`, `max`.
/// Statistics that are undefined for the data (everything except `count` on an empty
/// column, `std` with fewer than two values) are `None` and serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Number of non-missing values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    /// Minimum value.
    pub min: Option<f64>,
    /// 25th percentile.
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    /// Median.
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    /// 75th percentile.
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    /// Maximum value.
    pub max: Option<f64>,
}

impl NumericSummary {
    /// Summarize `values`. NaN inputs are ignored.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        if count == 0 {
            return Self {
                count,
                mean: None,
                std: None,
                min: None,
                p25: None,
                p50: None,
                p75: None,
                max: None,
            };
        }

        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Self {
            count,
            mean: defined(mean),
            std: std.and_then(defined),
            min: sorted.first().copied(),
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.5),
            p75: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }
}

fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Linear-interpolation quantile of already sorted data.
///
/// The quantile sits at position `q * (n - 1)`; fractional positions interpolate between the
/// two neighbouring values. Returns `None` for empty input or `q` outside `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if lo == hi || frac == 0.0 {
        return Some(sorted[lo]);
    }
    defined(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
