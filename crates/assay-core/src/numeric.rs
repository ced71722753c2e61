//! Numeric primitives shared by the regression and precision engines

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default relative tolerance for [`tolerant_difference`]
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use assay_core::numeric::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.total_cmp(b),
    });
    sorted
}

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
///
/// ```rust
/// use assay_core::numeric::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sum of squared deviations from the mean
pub fn sum_squared_deviations(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum()
}

/// Calculate the sample standard deviation
///
/// Returns 0.0 for slices with less than 2 elements.
///
/// ```rust
/// use assay_core::numeric::std_dev;
///
/// let sd = std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((sd - 1.58113883).abs() < 1e-6);
/// ```
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    (sum_squared_deviations(data) / (data.len() - 1) as f64).sqrt()
}

/// Empirical quantile of pre-sorted data with linear interpolation
///
/// Uses the `h = (n - 1)·p` convention. Returns NaN for empty input.
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return f64::NAN;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted_data.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted_data[lo] + (h - lo as f64) * (sorted_data[hi] - sorted_data[lo])
}

/// Empirical quantile of unsorted data with linear interpolation
pub fn quantile(data: &[f64], p: f64) -> f64 {
    quantile_sorted(&sorted(data), p)
}

/// Median, averaging the two middle elements for even lengths
pub fn median(data: &[f64]) -> f64 {
    quantile(data, 0.5)
}

/// Difference `a - b`, snapped to zero when it is below `epsilon` relative
/// to the mean magnitude of the operands
pub fn tolerant_difference(a: f64, b: f64, epsilon: f64) -> f64 {
    let delta = a - b;
    if delta.abs() < epsilon * (a.abs() + b.abs()) / 2.0 {
        0.0
    } else {
        delta
    }
}

/// Means and deviation sums of a paired sample
///
/// `u = Σw(x − x̄)²`, `q = Σw(y − ȳ)²`, `p = Σw(x − x̄)(y − ȳ)`, where the
/// means are weighted means when weights are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationSums {
    pub mean_x: f64,
    pub mean_y: f64,
    pub u: f64,
    pub q: f64,
    pub p: f64,
}

impl DeviationSums {
    /// Unweighted deviation sums
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let mean_x = mean(x);
        let mean_y = mean(y);
        let (mut u, mut q, mut p) = (0.0, 0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            u += dx * dx;
            q += dy * dy;
            p += dx * dy;
        }
        Self { mean_x, mean_y, u, q, p }
    }

    /// Deviation sums about the weighted means
    pub fn weighted(x: &[f64], y: &[f64], weights: &[f64]) -> Self {
        let total: f64 = weights.iter().sum();
        let mean_x = x.iter().zip(weights).map(|(&xi, &w)| w * xi).sum::<f64>() / total;
        let mean_y = y.iter().zip(weights).map(|(&yi, &w)| w * yi).sum::<f64>() / total;
        let (mut u, mut q, mut p) = (0.0, 0.0, 0.0);
        for ((&xi, &yi), &w) in x.iter().zip(y).zip(weights) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            u += w * dx * dx;
            q += w * dy * dy;
            p += w * dx * dy;
        }
        Self { mean_x, mean_y, u, q, p }
    }
}

/// Check that a paired sample has equal, non-zero lengths
pub fn validate_paired(x: &[f64], y: &[f64], context: &str) -> Result<()> {
    if x.is_empty() || y.is_empty() {
        return Err(Error::empty_input(context));
    }
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), context));
    }
    Ok(())
}

/// Check that every value of a paired sample is non-negative
pub fn validate_non_negative(x: &[f64], y: &[f64], context: &str) -> Result<()> {
    if let Some(v) = x.iter().chain(y).find(|v| v.is_nan() || **v < 0.0) {
        return Err(Error::InvalidInput(format!(
            "{context} requires non-negative values, found {v}"
        )));
    }
    Ok(())
}

/// Check that a significance level lies in (0, 1)
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_alpha(alpha))
    }
}
