//! Statistics for laboratory method validation
//!
//! Umbrella crate over the workspace:
//!
//! - [`core`]: errors, numeric primitives, distributions and the
//!   [`RegressionEstimator`](core::RegressionEstimator) capability
//! - [`regression`]: Deming, weighted Deming, Passing-Bablok and ordinary
//!   least squares fits for method comparison
//! - [`confidence`]: jackknife and bootstrap limits around any regression
//! - [`precision`]: one-factor and nested two-factor variance components
//!
//! # Example
//!
//! ```rust
//! use assay_stats::prelude::*;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let y = [1.1, 1.9, 3.2, 3.9, 5.1, 6.0];
//!
//! let fit = PassingBablokRegression::default().calculate(&x, &y).unwrap();
//! assert!(fit.has_slope_limits());
//!
//! let jackknife = JackknifeConfidenceInterval::new(&x, &y, DemingRegression::default());
//! let interval = jackknife.calculate().unwrap();
//! assert!(interval.slope_lcl() < interval.slope_ucl());
//! ```

pub use assay_confidence as confidence;
pub use assay_core as core;
pub use assay_precision as precision;
pub use assay_regression as regression;

pub mod prelude {
    pub use assay_confidence::{
        bootstrap_confidence_interval, jackknife_confidence_interval,
        BootstrapConfidenceInterval, ConfidenceIntervalEstimator, ConfidenceIntervalModel,
        JackknifeConfidenceInterval,
    };
    pub use assay_core::prelude::*;
    pub use assay_precision::{
        OneFactorVariance, OneFactorVarianceAnalysis, TwoFactorVariance,
        TwoFactorVarianceAnalysis,
    };
    pub use assay_regression::{
        DemingRegression, OrdinaryLeastSquares, PassingBablokRegression,
        WeightedDemingRegression,
    };
}
