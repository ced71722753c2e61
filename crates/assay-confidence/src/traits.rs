//! Core trait for confidence-interval estimation
//!
//! Interval estimators wrap a [`RegressionEstimator`](assay_core::RegressionEstimator)
//! together with the data they resample, so `calculate` takes no arguments and
//! any estimator can be decorated.

use crate::types::ConfidenceIntervalModel;
use assay_core::Result;

/// Resampling-based confidence-interval estimator over a regression fit
pub trait ConfidenceIntervalEstimator {
    /// Point estimate of the wrapped estimator on the full sample plus limits
    fn calculate(&self) -> Result<ConfidenceIntervalModel>;

    /// Two-sided significance level
    fn alpha(&self) -> f64;

    /// Get the confidence level
    fn confidence_level(&self) -> f64 {
        1.0 - self.alpha()
    }

    /// Interval method name
    fn name(&self) -> &str;
}
