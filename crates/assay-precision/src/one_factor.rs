//! Single-factor precision analysis
//!
//! One-way ANOVA over a factor such as run, with variance components, a
//! Satterthwaite within-laboratory df and verification factors for claimed CVs.

use crate::{
    satterthwaite::{satterthwaite_df, sd_confidence_limits, verification_factor, MeanSquareTerm},
    FactorGrouping, FactorLevel, OneFactorAnovaTable, OneFactorVariance,
};
use assay_core::{
    numeric::{mean, sum_squared_deviations, validate_alpha},
    Error, Result, DEFAULT_ALPHA,
};
use tracing::{debug, instrument};

pub(crate) fn collect_levels<L: Into<FactorLevel>>(
    levels: impl IntoIterator<Item = L>,
) -> Vec<FactorLevel> {
    levels.into_iter().map(Into::into).collect()
}

pub(crate) fn validate_values(values: &[f64], context: &str) -> Result<()> {
    if values.is_empty() {
        return Err(Error::empty_input(context));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "{context} requires finite measurement values"
        )));
    }
    Ok(())
}

/// One-way ANOVA
///
/// ```text
/// SST = Σ(x − x̄)²
/// SSB = Σ nᵢ(x̄ᵢ − x̄)²
/// SSE = Σᵢ Σ(x − x̄ᵢ)²
/// ```
///
/// Every term is a sum of squared deviations, so large measurement offsets
/// cannot cancel into negative sums.
#[derive(Debug, Clone, PartialEq)]
pub struct OneFactorAnova {
    levels: Vec<FactorLevel>,
    values: Vec<f64>,
}

impl OneFactorAnova {
    pub fn new<L: Into<FactorLevel>>(levels: impl IntoIterator<Item = L>, values: &[f64]) -> Self {
        Self {
            levels: collect_levels(levels),
            values: values.to_vec(),
        }
    }

    pub fn grouping(&self) -> FactorGrouping<FactorLevel> {
        FactorGrouping::from_pairs(&self.levels, &self.values)
    }

    #[instrument(skip(self), fields(n = self.values.len()))]
    pub fn calculate(&self) -> Result<OneFactorAnovaTable> {
        let context = "One-factor ANOVA";
        validate_values(&self.values, context)?;
        if self.levels.len() != self.values.len() {
            return Err(Error::size_mismatch(
                self.values.len(),
                self.levels.len(),
                context,
            ));
        }

        let grouping = self.grouping();
        let n = self.values.len();
        let p = grouping.len();
        if p < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: p,
            });
        }
        if n <= p {
            return Err(Error::InsufficientData {
                expected: p + 1,
                actual: n,
            });
        }

        let nf = n as f64;
        let grand_mean = mean(&self.values);
        let ss_total = sum_squared_deviations(&self.values);
        let ss_between = grouping
            .groups()
            .iter()
            .map(|g| g.len() as f64 * (mean(g) - grand_mean).powi(2))
            .sum::<f64>();
        let ss_error = grouping
            .groups()
            .iter()
            .map(|g| sum_squared_deviations(g))
            .sum::<f64>();

        let df_between = p - 1;
        let df_error = n - p;
        let ms_between = ss_between / df_between as f64;
        let ms_error = ss_error / df_error as f64;

        let sum_sq_sizes: f64 = grouping
            .groups()
            .iter()
            .map(|g| (g.len() * g.len()) as f64)
            .sum();
        let n0 = (nf - sum_sq_sizes / nf) / df_between as f64;

        debug!(ss_total, ss_between, ss_error, n0, "One-factor ANOVA totals");

        Ok(OneFactorAnovaTable {
            grand_mean,
            n_observations: n,
            n_groups: p,
            ss_total,
            ss_between,
            ss_error,
            df_total: n - 1,
            df_between,
            df_error,
            ms_between,
            ms_error,
            f_ratio: ms_between / ms_error,
            n0,
        })
    }
}

/// Variance components and verification limits of a single-factor study
///
/// `vE = MSE`, `vB = max(0, (MSB − MSE)/n0)`, `vWL = vB + vE`. The within-lab
/// df is the Satterthwaite df of `(1 − 1/n0)·MSE + (1/n0)·MSB`, or `dfE`
/// when `vB` is floored to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OneFactorVarianceAnalysis {
    anova: OneFactorAnova,
    num_levels: usize,
    alpha: f64,
}

impl OneFactorVarianceAnalysis {
    /// `num_levels` is the number of concentration levels the verification
    /// limits are Bonferroni-corrected over
    pub fn new<L: Into<FactorLevel>>(
        levels: impl IntoIterator<Item = L>,
        values: &[f64],
        num_levels: usize,
    ) -> Self {
        Self {
            anova: OneFactorAnova::new(levels, values),
            num_levels,
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

    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    #[instrument(skip(self), fields(num_levels = self.num_levels, alpha = self.alpha))]
    pub fn calculate(&self) -> Result<OneFactorVariance> {
        validate_alpha(self.alpha)?;
        if self.num_levels == 0 {
            return Err(Error::InvalidParameter(
                "Number of levels must be positive".to_string(),
            ));
        }
        let anova = self.anova.calculate()?;

        let v_error = anova.ms_error;
        let v_between = ((anova.ms_between - anova.ms_error) / anova.n0).max(0.0);
        let v_within_lab = v_between + v_error;

        let df_error = anova.df_error as f64;
        let df_within_lab = if v_between > 0.0 {
            let b = 1.0 / anova.n0;
            satterthwaite_df(&[
                MeanSquareTerm::new(1.0 - b, anova.ms_error, df_error),
                MeanSquareTerm::new(b, anova.ms_between, anova.df_between as f64),
            ])?
        } else {
            df_error
        };
        debug!(v_error, v_between, df_within_lab, "One-factor variance components");

        let f_repeatability = verification_factor(df_error, self.alpha, self.num_levels)?;
        let f_within_lab = verification_factor(df_within_lab, self.alpha, self.num_levels)?;
        let repeatability_limits = sd_confidence_limits(v_error.sqrt(), df_error, self.alpha)?;
        let within_lab_limits =
            sd_confidence_limits(v_within_lab.sqrt(), df_within_lab, self.alpha)?;

        Ok(OneFactorVariance {
            anova,
            v_error,
            v_between,
            v_within_lab,
            df_within_lab,
            f_repeatability,
            f_within_lab,
            num_levels: self.num_levels,
            alpha: self.alpha,
            repeatability_limits,
            within_lab_limits,
        })
    }

    /// Upper verification limit for a claimed repeatability CV
    pub fn uvl_repeatability(&self, cv_claim: f64) -> Result<f64> {
        Ok(self.calculate()?.uvl_repeatability(cv_claim))
    }

    /// Upper verification limit for a claimed within-lab CV
    pub fn uvl_within_lab(&self, cv_claim: f64) -> Result<f64> {
        Ok(self.calculate()?.uvl_within_lab(cv_claim))
    }
}
