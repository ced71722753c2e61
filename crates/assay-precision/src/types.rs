//! ANOVA tables and variance-component results

use assay_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coefficient of variation in percent of `mean`
pub fn cv_percent(sd: f64, mean: f64) -> Result<f64> {
    if mean == 0.0 {
        return Err(Error::NumericDomain(
            "Coefficient of variation is undefined for a zero grand mean".to_string(),
        ));
    }
    Ok(100.0 * sd / mean.abs())
}

/// Chi-square confidence limits on a standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdLimits {
    pub lower: f64,
    pub upper: f64,
    /// Degrees of freedom the limits were computed with
    pub df: f64,
    pub confidence_level: f64,
}

impl SdLimits {
    pub fn contains(&self, sd: f64) -> bool {
        sd >= self.lower && sd <= self.upper
    }
}

/// One-way ANOVA decomposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneFactorAnovaTable {
    pub grand_mean: f64,
    pub n_observations: usize,
    pub n_groups: usize,
    pub ss_total: f64,
    pub ss_between: f64,
    pub ss_error: f64,
    pub df_total: usize,
    pub df_between: usize,
    pub df_error: usize,
    pub ms_between: f64,
    pub ms_error: f64,
    /// `MSB / MSE`
    pub f_ratio: f64,
    /// Effective group size `(N − Σnᵢ²/N)/(p − 1)`
    pub n0: f64,
}

/// Variance components of a single-factor precision study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneFactorVariance {
    pub anova: OneFactorAnovaTable,
    /// Repeatability variance (MSE)
    pub v_error: f64,
    /// Between-group variance, floored at zero
    pub v_between: f64,
    pub v_within_lab: f64,
    pub df_within_lab: f64,
    /// SD-scale multiplier for a claimed repeatability CV
    pub f_repeatability: f64,
    /// SD-scale multiplier for a claimed within-lab CV
    pub f_within_lab: f64,
    pub num_levels: usize,
    pub alpha: f64,
    pub repeatability_limits: SdLimits,
    pub within_lab_limits: SdLimits,
}

impl OneFactorVariance {
    pub fn sd_repeatability(&self) -> f64 {
        self.v_error.sqrt()
    }

    pub fn sd_between(&self) -> f64 {
        self.v_between.sqrt()
    }

    pub fn sd_within_lab(&self) -> f64 {
        self.v_within_lab.sqrt()
    }

    pub fn cv_repeatability(&self) -> Result<f64> {
        cv_percent(self.sd_repeatability(), self.anova.grand_mean)
    }

    pub fn cv_between(&self) -> Result<f64> {
        cv_percent(self.sd_between(), self.anova.grand_mean)
    }

    pub fn cv_within_lab(&self) -> Result<f64> {
        cv_percent(self.sd_within_lab(), self.anova.grand_mean)
    }

    /// Upper verification limit for a claimed repeatability CV
    pub fn uvl_repeatability(&self, cv_claim: f64) -> f64 {
        cv_claim * self.f_repeatability
    }

    /// Upper verification limit for a claimed within-lab CV
    pub fn uvl_within_lab(&self, cv_claim: f64) -> f64 {
        cv_claim * self.f_within_lab
    }
}

/// Nested day/run ANOVA decomposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoFactorAnovaTable {
    pub grand_mean: f64,
    pub n_observations: usize,
    pub num_days: usize,
    pub num_runs: usize,
    pub num_replicates: usize,
    pub ss_total: f64,
    /// Between days (SSA)
    pub ss_days: f64,
    /// Between runs within days (SSB)
    pub ss_runs: f64,
    /// Within run cells (SSE)
    pub ss_error: f64,
    pub df_total: usize,
    pub df_days: usize,
    pub df_runs: usize,
    pub df_error: usize,
    pub ms_days: f64,
    pub ms_runs: f64,
    pub ms_error: f64,
    /// `MSA / MSB`
    pub f_days: f64,
    /// `MSB / MSE`
    pub f_runs: f64,
}

/// Variance components of a nested day/run precision study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoFactorVariance {
    pub anova: TwoFactorAnovaTable,
    /// Repeatability variance (MSE)
    pub v_error: f64,
    /// Between-run variance, floored at zero
    pub v_run: f64,
    /// Between-day variance, floored at zero
    pub v_day: f64,
    pub v_within_lab: f64,
    pub df_within_lab: f64,
    pub alpha: f64,
    pub repeatability_limits: SdLimits,
    pub within_lab_limits: SdLimits,
}

impl TwoFactorVariance {
    pub fn sd_repeatability(&self) -> f64 {
        self.v_error.sqrt()
    }

    pub fn sd_between_run(&self) -> f64 {
        self.v_run.sqrt()
    }

    pub fn sd_between_day(&self) -> f64 {
        self.v_day.sqrt()
    }

    pub fn sd_within_lab(&self) -> f64 {
        self.v_within_lab.sqrt()
    }

    pub fn cv_repeatability(&self) -> Result<f64> {
        cv_percent(self.sd_repeatability(), self.anova.grand_mean)
    }

    pub fn cv_between_run(&self) -> Result<f64> {
        cv_percent(self.sd_between_run(), self.anova.grand_mean)
    }

    pub fn cv_between_day(&self) -> Result<f64> {
        cv_percent(self.sd_between_day(), self.anova.grand_mean)
    }

    pub fn cv_within_lab(&self) -> Result<f64> {
        cv_percent(self.sd_within_lab(), self.anova.grand_mean)
    }
}

impl fmt::Display for TwoFactorVariance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SD repeatability {:.4}, between-run {:.4}, between-day {:.4}, within-lab {:.4} (df {:.2})",
            self.sd_repeatability(),
            self.sd_between_run(),
            self.sd_between_day(),
            self.sd_within_lab(),
            self.df_within_lab
        )
    }
}
