//! Nested day/run precision analysis
//!
//! Two-factor nested ANOVA for designs with `D` days, `R` runs per day and
//! `n` replicates per run. Only balanced designs are accepted.

use crate::{
    grouping::NestedGrouping,
    one_factor::{collect_levels, validate_values},
    satterthwaite::{satterthwaite_df, sd_confidence_limits, MeanSquareTerm},
    FactorLevel, TwoFactorAnovaTable, TwoFactorVariance,
};
use assay_core::{
    numeric::{mean, sum_squared_deviations, validate_alpha},
    Error, Result, DEFAULT_ALPHA,
};
use tracing::{debug, instrument};

/// Nested two-factor ANOVA
///
/// `SST`, `SSA` (between days) and `SSE` (within run cells) are computed
/// directly; the between-run term is `SSB = SST − SSA − SSE` with
/// `dfB = Σ_days (runs − 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoFactorNestedAnova {
    days: Vec<FactorLevel>,
    runs: Vec<FactorLevel>,
    values: Vec<f64>,
}

impl TwoFactorNestedAnova {
    pub fn new<D, R>(
        days: impl IntoIterator<Item = D>,
        runs: impl IntoIterator<Item = R>,
        values: &[f64],
    ) -> Self
    where
        D: Into<FactorLevel>,
        R: Into<FactorLevel>,
    {
        Self {
            days: collect_levels(days),
            runs: collect_levels(runs),
            values: values.to_vec(),
        }
    }

    pub fn grouping(&self) -> NestedGrouping {
        NestedGrouping::from_nested(&self.days, &self.runs, &self.values)
    }

    fn validate_shape(&self) -> Result<()> {
        let context = "Two-factor nested ANOVA";
        validate_values(&self.values, context)?;
        if self.days.len() != self.values.len() {
            return Err(Error::size_mismatch(self.values.len(), self.days.len(), context));
        }
        if self.runs.len() != self.values.len() {
            return Err(Error::size_mismatch(self.values.len(), self.runs.len(), context));
        }
        Ok(())
    }

    /// Check that every day has the same runs and every run the same replicates
    fn balanced_grouping(&self) -> Result<(NestedGrouping, usize, usize)> {
        self.validate_shape()?;
        let grouping = self.grouping();
        let days = grouping.len();
        let runs = grouping.max_runs();
        let replicates = grouping.max_replicates();
        let observations = self.values.len();

        if days * runs * replicates != observations {
            return Err(Error::UnbalancedDesign {
                days,
                runs,
                replicates,
                observations,
            });
        }
        if days < 2 || runs < 2 || replicates < 2 {
            return Err(Error::InvalidInput(format!(
                "Nested design needs at least 2 days, 2 runs per day and 2 replicates per run, got {days} x {runs} x {replicates}"
            )));
        }
        Ok((grouping, runs, replicates))
    }

    #[instrument(skip(self), fields(n = self.values.len()))]
    pub fn calculate(&self) -> Result<TwoFactorAnovaTable> {
        let (grouping, num_runs, num_replicates) = self.balanced_grouping()?;
        let n = self.values.len();
        let num_days = grouping.len();

        let grand_mean = mean(&self.values);
        let ss_total = sum_squared_deviations(&self.values);

        let mut ss_days = 0.0;
        let mut df_runs = 0;
        for runs in grouping.groups() {
            let day_values: Vec<f64> = runs.groups().iter().flatten().copied().collect();
            let deviation = mean(&day_values) - grand_mean;
            ss_days += day_values.len() as f64 * deviation * deviation;
            df_runs += runs.len() - 1;
        }

        let mut ss_error = 0.0;
        let mut df_error = 0;
        for cell in grouping.cells() {
            ss_error += sum_squared_deviations(cell);
            df_error += cell.len() - 1;
        }

        let ss_runs = ss_total - ss_days - ss_error;
        let df_days = num_days - 1;
        let ms_days = ss_days / df_days as f64;
        let ms_runs = ss_runs / df_runs as f64;
        let ms_error = ss_error / df_error as f64;
        debug!(ss_total, ss_days, ss_runs, ss_error, "Nested ANOVA totals");

        Ok(TwoFactorAnovaTable {
            grand_mean,
            n_observations: n,
            num_days,
            num_runs,
            num_replicates,
            ss_total,
            ss_days,
            ss_runs,
            ss_error,
            df_total: n - 1,
            df_days,
            df_runs,
            df_error,
            ms_days,
            ms_runs,
            ms_error,
            f_days: ms_days / ms_runs,
            f_runs: ms_runs / ms_error,
        })
    }

    /// Between-run sum of squares from cell means, with its df
    ///
    /// `Σ n_cell·(cell_mean − day_mean)²` where the day mean is the mean of
    /// that day's cell means. Agrees with `SST − SSA − SSE` on balanced data
    /// and is never used for the variance components. Unbalanced designs are
    /// accepted here.
    pub fn cell_mean_between_runs(&self) -> Result<(f64, usize)> {
        self.validate_shape()?;
        let grouping = self.grouping();

        let mut ss = 0.0;
        let mut df = 0;
        for runs in grouping.groups() {
            let cell_means: Vec<f64> = runs.groups().iter().map(|cell| mean(cell)).collect();
            let day_mean = mean(&cell_means);
            for (cell, cell_mean) in runs.groups().iter().zip(&cell_means) {
                ss += cell.len() as f64 * (cell_mean - day_mean).powi(2);
            }
            df += runs.len() - 1;
        }
        Ok((ss, df))
    }
}

/// Variance components of a nested day/run study
///
/// ```text
/// vE = MSE
/// vB = max(0, (MSB − MSE)/n)
/// vA = max(0, (MSA − MSB)/(R·n))
/// vWL = vA + vB + vE
/// ```
///
/// The within-lab df is the Satterthwaite df of `vWL` written as a
/// combination of mean squares, over the components that stay positive.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoFactorVarianceAnalysis {
    anova: TwoFactorNestedAnova,
    alpha: f64,
}

impl TwoFactorVarianceAnalysis {
    pub fn new<D, R>(
        days: impl IntoIterator<Item = D>,
        runs: impl IntoIterator<Item = R>,
        values: &[f64],
    ) -> Self
    where
        D: Into<FactorLevel>,
        R: Into<FactorLevel>,
    {
        Self {
            anova: TwoFactorNestedAnova::new(days, runs, values),
            alpha: DEFAULT_ALPHA,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn anova(&self) -> &TwoFactorNestedAnova {
        &self.anova
    }

    #[instrument(skip(self), fields(alpha = self.alpha))]
    pub fn calculate(&self) -> Result<TwoFactorVariance> {
        validate_alpha(self.alpha)?;
        let anova = self.anova.calculate()?;

        let n = anova.num_replicates as f64;
        let rn = anova.num_runs as f64 * n;
        let v_error = anova.ms_error;
        let v_run = ((anova.ms_runs - anova.ms_error) / n).max(0.0);
        let v_day = ((anova.ms_days - anova.ms_runs) / rn).max(0.0);
        let v_within_lab = v_day + v_run + v_error;

        let (mut c_days, mut c_runs, mut c_error) = (0.0, 0.0, 1.0);
        if v_day > 0.0 {
            c_days += 1.0 / rn;
            c_runs -= 1.0 / rn;
        }
        if v_run > 0.0 {
            c_runs += 1.0 / n;
            c_error -= 1.0 / n;
        }
        let df_within_lab = if v_within_lab > 0.0 {
            satterthwaite_df(&[
                MeanSquareTerm::new(c_days, anova.ms_days, anova.df_days as f64),
                MeanSquareTerm::new(c_runs, anova.ms_runs, anova.df_runs as f64),
                MeanSquareTerm::new(c_error, anova.ms_error, anova.df_error as f64),
            ])?
        } else {
            anova.df_error as f64
        };
        debug!(v_day, v_run, v_error, df_within_lab, "Nested variance components");

        let repeatability_limits =
            sd_confidence_limits(v_error.sqrt(), anova.df_error as f64, self.alpha)?;
        let within_lab_limits =
            sd_confidence_limits(v_within_lab.sqrt(), df_within_lab, self.alpha)?;

        Ok(TwoFactorVariance {
            anova,
            v_error,
            v_run,
            v_day,
            v_within_lab,
            df_within_lab,
            alpha: self.alpha,
            repeatability_limits,
            within_lab_limits,
        })
    }
}
