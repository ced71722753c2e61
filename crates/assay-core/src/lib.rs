//! Core traits and types for method-validation statistics
//!
//! This crate holds the pieces shared by the regression, confidence-interval
//! and precision crates:
//!
//! - [`Error`] and [`Result`], the error taxonomy used everywhere
//! - [`numeric`] primitives: mean, standard deviation, sums of squared
//!   deviations, interpolated quantiles, tolerant differences
//! - [`math::distributions`] quantiles backed by `statrs`
//! - the [`RegressionEstimator`] capability and the [`RegressionModel`] it produces
//!
//! # Example
//!
//! ```rust
//! use assay_core::numeric::{mean, quantile, std_dev};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(mean(&data), 3.0);
//! assert_eq!(quantile(&data, 0.5), 3.0);
//! assert!((std_dev(&data) - 1.5811).abs() < 1e-4);
//! ```

pub mod error;
pub mod math;
pub mod numeric;
pub mod traits;
pub mod types;

// Re-export core types
pub use error::{Error, Result};
pub use numeric::DeviationSums;
pub use traits::RegressionEstimator;
pub use types::RegressionModel;

/// Default two-sided significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{RegressionEstimator, RegressionModel, Result, DEFAULT_ALPHA};
}
