//! Method-comparison regression
//!
//! Estimators for comparing a candidate measurement procedure (`y`) against a
//! comparative one (`x`), all implementing [`RegressionEstimator`]:
//!
//! - [`DemingRegression`]: errors in both variables, constant error ratio
//! - [`WeightedDemingRegression`]: Deming with constant-CV reweighting
//! - [`PassingBablokRegression`]: rank-based, with slope and intercept limits
//! - [`OrdinaryLeastSquares`]: error-free `x` baseline
//!
//! # Example
//!
//! ```rust
//! use assay_regression::{DemingRegression, PassingBablokRegression};
//! use assay_core::RegressionEstimator;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let y = [1.1, 2.3, 2.9, 4.2, 4.8, 6.1, 7.2, 7.9];
//!
//! let deming = DemingRegression::default().calculate(&x, &y).unwrap();
//! let pb = PassingBablokRegression::default().calculate(&x, &y).unwrap();
//! assert!((deming.slope - 1.0).abs() < 0.1);
//! assert!(pb.slope_lcl <= pb.slope && pb.slope <= pb.slope_ucl);
//! ```

pub mod deming;
pub mod iteration;
pub mod ols;
pub mod passing_bablok;
pub mod weighted_deming;

pub use assay_core::{RegressionEstimator, RegressionModel};
pub use deming::DemingRegression;
pub use iteration::IterationOutcome;
pub use ols::OrdinaryLeastSquares;
pub use passing_bablok::{AngleMatrix, PassingBablokRegression};
pub use weighted_deming::{WeightedDemingParameters, WeightedDemingRegression};
