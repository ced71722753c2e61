//! Regression model value type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fitted method-comparison line `y = intercept + slope·x`
///
/// Limit fields are NaN when the estimator that produced the model does not
/// compute them itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    pub slope_lcl: f64,
    pub slope_ucl: f64,
    pub intercept_lcl: f64,
    pub intercept_ucl: f64,
}

impl RegressionModel {
    /// Point estimate without confidence limits
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self {
            slope,
            intercept,
            slope_lcl: f64::NAN,
            slope_ucl: f64::NAN,
            intercept_lcl: f64::NAN,
            intercept_ucl: f64::NAN,
        }
    }

    /// Attach slope limits
    pub fn with_slope_limits(mut self, lower: f64, upper: f64) -> Self {
        self.slope_lcl = lower;
        self.slope_ucl = upper;
        self
    }

    /// Attach intercept limits
    pub fn with_intercept_limits(mut self, lower: f64, upper: f64) -> Self {
        self.intercept_lcl = lower;
        self.intercept_ucl = upper;
        self
    }

    /// Bit-for-bit equality of all six fields
    ///
    /// Unlike `==`, two models with the same NaN limits compare equal.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.fields()
            .iter()
            .zip(other.fields())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    fn fields(&self) -> [f64; 6] {
        [
            self.slope,
            self.intercept,
            self.slope_lcl,
            self.slope_ucl,
            self.intercept_lcl,
            self.intercept_ucl,
        ]
    }

    /// Predicted comparison-method value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Systematic difference between the methods at decision level `x`
    pub fn bias_at(&self, x: f64) -> f64 {
        self.predict(x) - x
    }

    pub fn has_slope_limits(&self) -> bool {
        !self.slope_lcl.is_nan() && !self.slope_ucl.is_nan()
    }

    pub fn has_intercept_limits(&self) -> bool {
        !self.intercept_lcl.is_nan() && !self.intercept_ucl.is_nan()
    }
}

impl fmt::Display for RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y = {:.4} + {:.4}x (slope [{:.4}, {:.4}], intercept [{:.4}, {:.4}])",
            self.intercept,
            self.slope,
            self.slope_lcl,
            self.slope_ucl,
            self.intercept_lcl,
            self.intercept_ucl
        )
    }
}
