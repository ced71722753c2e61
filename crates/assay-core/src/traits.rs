//! Core traits for method-comparison estimation
//!
//! Regression variants implement [`RegressionEstimator`]; the resampling
//! confidence-interval estimators are written against this trait only, so any
//! variant (or a caller's own estimator) can be plugged in by reference.

use crate::{RegressionModel, Result};

/// A method-comparison regression estimator
///
/// Implementations are stateless with respect to the data: every call to
/// [`calculate`](RegressionEstimator::calculate) produces a fresh model and
/// repeated calls on identical data return identical results.
///
/// # Example
///
/// ```rust
/// use assay_core::{RegressionEstimator, RegressionModel, Result};
///
/// struct ThroughOrigin;
///
/// impl RegressionEstimator for ThroughOrigin {
///     fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
///         let sxy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
///         let sxx: f64 = x.iter().map(|a| a * a).sum();
///         Ok(RegressionModel::new(0.0, sxy / sxx))
///     }
///
///     fn name(&self) -> &str { "Through origin" }
/// }
///
/// let model = ThroughOrigin.calculate(&[1.0, 2.0], &[2.0, 4.0]).unwrap();
/// assert_eq!(model.slope, 2.0);
/// ```
pub trait RegressionEstimator {
    /// Fit the model to paired observations `(x, y)`
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel>;

    /// Human-readable estimator name
    fn name(&self) -> &str;

    /// Whether the estimator fills the slope/intercept limits itself
    fn computes_limits(&self) -> bool {
        false
    }
}

impl<E: RegressionEstimator + ?Sized> RegressionEstimator for &E {
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
        (**self).calculate(x, y)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn computes_limits(&self) -> bool {
        (**self).computes_limits()
    }
}

impl<E: RegressionEstimator + ?Sized> RegressionEstimator for Box<E> {
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
        (**self).calculate(x, y)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn computes_limits(&self) -> bool {
        (**self).computes_limits()
    }
}
