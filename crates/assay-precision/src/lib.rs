//! Variance-component analysis for precision studies
//!
//! ANOVA engines that split measurement variance into repeatability,
//! between-run and between-day parts:
//!
//! - [`OneFactorAnova`] / [`OneFactorVarianceAnalysis`]: a single factor such
//!   as run, with verification limits for claimed CVs
//! - [`TwoFactorNestedAnova`] / [`TwoFactorVarianceAnalysis`]: balanced
//!   day/run designs with Satterthwaite within-lab df and chi-square SD limits
//!
//! Factor levels may be numbers or labels; see [`FactorLevel`].
//!
//! # Example
//!
//! ```rust
//! use assay_precision::OneFactorVarianceAnalysis;
//!
//! let runs = [1, 1, 1, 2, 2, 2, 3, 3, 3];
//! let values = [10.1, 10.3, 9.9, 10.6, 10.8, 10.5, 9.8, 10.0, 9.7];
//!
//! let result = OneFactorVarianceAnalysis::new(runs, &values, 1).calculate().unwrap();
//! assert!(result.v_between >= 0.0);
//! assert!(result.uvl_repeatability(2.0) > 2.0);
//! ```

pub mod grouping;
pub mod one_factor;
pub mod satterthwaite;
pub mod two_factor;
pub mod types;

pub use grouping::{FactorGrouping, FactorLevel, NestedGrouping};
pub use one_factor::{OneFactorAnova, OneFactorVarianceAnalysis};
pub use satterthwaite::{satterthwaite_df, sd_confidence_limits, verification_factor, MeanSquareTerm};
pub use two_factor::{TwoFactorNestedAnova, TwoFactorVarianceAnalysis};
pub use types::{
    cv_percent, OneFactorAnovaTable, OneFactorVariance, SdLimits, TwoFactorAnovaTable,
    TwoFactorVariance,
};
