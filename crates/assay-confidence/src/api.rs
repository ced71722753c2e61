//! High-level API for regression confidence intervals
//!
//! This module provides one-call functions for the common jackknife and
//! bootstrap calculations.

use crate::{
    BootstrapConfidenceInterval, ConfidenceIntervalEstimator, ConfidenceIntervalModel,
    JackknifeConfidenceInterval,
};
use assay_core::{RegressionEstimator, Result};

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 5000;

/// Fast number of resamples for latency-bound callers
pub const FAST_RESAMPLES: usize = 1000;

/// High-precision number of resamples
pub const HIGH_PRECISION_RESAMPLES: usize = 20000;

/// Jackknife limits for `estimator` at significance level `alpha`
///
/// # Example
/// ```rust
/// use assay_confidence::api::jackknife_confidence_interval;
/// use assay_regression::DemingRegression;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let y = [1.1, 2.1, 2.8, 4.2, 4.9, 6.1];
///
/// let result = jackknife_confidence_interval(&x, &y, DemingRegression::default(), 0.05).unwrap();
/// assert!(result.slope_lcl() < result.slope() && result.slope() < result.slope_ucl());
/// ```
pub fn jackknife_confidence_interval<E: RegressionEstimator>(
    x: &[f64],
    y: &[f64],
    estimator: E,
    alpha: f64,
) -> Result<ConfidenceIntervalModel> {
    JackknifeConfidenceInterval::new(x, y, estimator)
        .with_alpha(alpha)
        .calculate()
}

/// Percentile-bootstrap limits for `estimator`
///
/// Pass a `seed` for reproducible resamples.
///
/// # Example
/// ```rust
/// use assay_confidence::api::{bootstrap_confidence_interval, FAST_RESAMPLES};
/// use assay_regression::PassingBablokRegression;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let y = [1.1, 2.3, 2.9, 4.2, 4.8, 6.1, 7.2, 7.9];
///
/// let result = bootstrap_confidence_interval(
///     &x,
///     &y,
///     PassingBablokRegression::default(),
///     FAST_RESAMPLES,
///     0.05,
///     Some(42),
/// )
/// .unwrap();
/// assert!(result.slope_lcl() <= result.slope_ucl());
/// ```
pub fn bootstrap_confidence_interval<E: RegressionEstimator + Sync>(
    x: &[f64],
    y: &[f64],
    estimator: E,
    n_resamples: usize,
    alpha: f64,
    seed: Option<u64>,
) -> Result<ConfidenceIntervalModel> {
    let bootstrap = BootstrapConfidenceInterval::new(x, y, estimator)
        .with_resamples(n_resamples)
        .with_alpha(alpha);
    match seed {
        Some(seed) => bootstrap.with_seed(seed).calculate(),
        None => bootstrap.calculate(),
    }
}
