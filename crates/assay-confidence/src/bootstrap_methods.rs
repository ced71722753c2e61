//! Bootstrap method implementations
//!
//! This module provides the rules that turn a bootstrap distribution of a
//! coefficient into a confidence interval.

use crate::{bootstrap::BootstrapMethod, ConfidenceInterval};
use assay_core::{
    numeric::{quantile_sorted, sorted, validate_alpha},
    Error, Result,
};

fn checked_sorted(bootstrap_estimates: &[f64], confidence_level: f64) -> Result<Vec<f64>> {
    if bootstrap_estimates.is_empty() {
        return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
    }
    validate_alpha(1.0 - confidence_level)?;
    Ok(sorted(bootstrap_estimates))
}

/// Percentile bootstrap method
///
/// Uses the empirical `α/2` and `1 − α/2` quantiles of the bootstrap
/// distribution, linearly interpolated between order statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileBootstrap;

impl BootstrapMethod for PercentileBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let sorted = checked_sorted(bootstrap_estimates, confidence_level)?;
        let alpha = 1.0 - confidence_level;

        Ok(ConfidenceInterval::new(
            quantile_sorted(&sorted, alpha / 2.0),
            quantile_sorted(&sorted, 1.0 - alpha / 2.0),
            original_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

/// Basic (reverse percentile) bootstrap method
///
/// Reflects the percentile bounds around the original estimate:
/// `[2θ̂ − q(1 − α/2), 2θ̂ − q(α/2)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicBootstrap;

impl BootstrapMethod for BasicBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let sorted = checked_sorted(bootstrap_estimates, confidence_level)?;
        let alpha = 1.0 - confidence_level;

        let lower_q = quantile_sorted(&sorted, alpha / 2.0);
        let upper_q = quantile_sorted(&sorted, 1.0 - alpha / 2.0);

        Ok(ConfidenceInterval::new(
            2.0 * original_estimate - upper_q,
            2.0 * original_estimate - lower_q,
            original_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Basic Bootstrap"
    }
}
