//! Resampling confidence intervals for method-comparison regression
//!
//! Decorators that put confidence limits on any
//! [`RegressionEstimator`](assay_core::RegressionEstimator):
//!
//! - **Jackknife**: leave-one-out pseudo-values, Student-t limits and
//!   standard errors for both coefficients
//! - **Bootstrap**: resampling with replacement, percentile limits by
//!   default, other rules through [`BootstrapMethod`]
//!
//! # Examples
//!
//! ```rust
//! use assay_confidence::{ConfidenceIntervalEstimator, JackknifeConfidenceInterval};
//! use assay_regression::DemingRegression;
//!
//! let x = [2.0, 4.1, 6.3, 7.9, 10.2, 12.0, 13.8, 16.1];
//! let y = [2.2, 4.0, 6.6, 8.1, 10.0, 12.5, 14.1, 16.0];
//!
//! let jackknife = JackknifeConfidenceInterval::new(&x, &y, DemingRegression::default());
//! let result = jackknife.calculate().unwrap();
//! println!("slope {:.3} [{:.3}, {:.3}]", result.slope(), result.slope_lcl(), result.slope_ucl());
//! assert!(result.slope_contains_one());
//! ```

pub mod api;
mod bootstrap;
mod bootstrap_methods;
mod jackknife;
mod traits;
mod types;

// Re-exports
pub use api::{
    bootstrap_confidence_interval, jackknife_confidence_interval, DEFAULT_RESAMPLES,
    FAST_RESAMPLES, HIGH_PRECISION_RESAMPLES,
};
pub use bootstrap::{BootstrapConfidenceInterval, BootstrapDistribution, BootstrapMethod};
pub use bootstrap_methods::{BasicBootstrap, PercentileBootstrap};
pub use jackknife::{JackknifeConfidenceInterval, JackknifePseudoValues};
pub use traits::ConfidenceIntervalEstimator;
pub use types::{ConfidenceInterval, ConfidenceIntervalModel};
