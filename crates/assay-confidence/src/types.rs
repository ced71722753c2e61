//! Common types for confidence intervals

use assay_core::RegressionModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate
    pub estimate: f64,
    /// Confidence level (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, estimate: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
            confidence_level,
        }
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Margin of error (half-width)
    pub fn margin_of_error(&self) -> f64 {
        self.width() / 2.0
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.4}, {:.4}], estimate: {:.4}",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

/// Regression model with resampling-based limits and standard errors
///
/// Standard errors are NaN when the interval method does not produce them
/// (percentile bootstrap).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervalModel {
    pub model: RegressionModel,
    pub slope_se: f64,
    pub intercept_se: f64,
    /// Two-sided level the limits were computed at
    pub confidence_level: f64,
}

impl ConfidenceIntervalModel {
    pub fn new(
        model: RegressionModel,
        slope_se: f64,
        intercept_se: f64,
        confidence_level: f64,
    ) -> Self {
        Self {
            model,
            slope_se,
            intercept_se,
            confidence_level,
        }
    }

    pub fn slope(&self) -> f64 {
        self.model.slope
    }

    pub fn intercept(&self) -> f64 {
        self.model.intercept
    }

    pub fn slope_lcl(&self) -> f64 {
        self.model.slope_lcl
    }

    pub fn slope_ucl(&self) -> f64 {
        self.model.slope_ucl
    }

    pub fn intercept_lcl(&self) -> f64 {
        self.model.intercept_lcl
    }

    pub fn intercept_ucl(&self) -> f64 {
        self.model.intercept_ucl
    }

    pub fn slope_interval(&self) -> ConfidenceInterval {
        ConfidenceInterval::new(
            self.model.slope_lcl,
            self.model.slope_ucl,
            self.model.slope,
            self.confidence_level,
        )
    }

    pub fn intercept_interval(&self) -> ConfidenceInterval {
        ConfidenceInterval::new(
            self.model.intercept_lcl,
            self.model.intercept_ucl,
            self.model.intercept,
            self.confidence_level,
        )
    }

    /// No proportional difference between the methods at this level
    pub fn slope_contains_one(&self) -> bool {
        self.slope_interval().contains(1.0)
    }

    /// No constant difference between the methods at this level
    pub fn intercept_contains_zero(&self) -> bool {
        self.intercept_interval().contains(0.0)
    }
}

impl fmt::Display for ConfidenceIntervalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (SE slope {:.4}, SE intercept {:.4})",
            self.model, self.slope_se, self.intercept_se
        )
    }
}
