//! Leave-one-out (jackknife) confidence limits
//!
//! Standard errors follow Linnet's pseudo-value formulation: for a
//! coefficient `b` with full-sample estimate `b̂` and leave-one-out estimates
//! `b̂₍₋ᵢ₎`, the pseudo-values are `dᵢ = n·b̂ − (n−1)·b̂₍₋ᵢ₎` and
//! `SE = sd(d)/√n`. Limits use Student's t with `n − 2` degrees of freedom.

use crate::{ConfidenceIntervalEstimator, ConfidenceIntervalModel};
use assay_core::{
    math::distributions::students_t,
    numeric::{std_dev, validate_alpha, validate_paired},
    Error, RegressionEstimator, RegressionModel, Result, DEFAULT_ALPHA,
};
use tracing::{debug, instrument};

/// Pseudo-values of the slope and intercept, one per left-out observation
#[derive(Debug, Clone, PartialEq)]
pub struct JackknifePseudoValues {
    pub slope: Vec<f64>,
    pub intercept: Vec<f64>,
}

impl JackknifePseudoValues {
    pub fn slope_se(&self) -> f64 {
        std_dev(&self.slope) / (self.slope.len() as f64).sqrt()
    }

    pub fn intercept_se(&self) -> f64 {
        std_dev(&self.intercept) / (self.intercept.len() as f64).sqrt()
    }
}

/// Jackknife confidence interval around any regression estimator
#[derive(Debug, Clone)]
pub struct JackknifeConfidenceInterval<'a, E> {
    x: &'a [f64],
    y: &'a [f64],
    estimator: E,
    alpha: f64,
}

impl<'a, E: RegressionEstimator> JackknifeConfidenceInterval<'a, E> {
    pub fn new(x: &'a [f64], y: &'a [f64], estimator: E) -> Self {
        Self {
            x,
            y,
            estimator,
            alpha: DEFAULT_ALPHA,
        }
    }

    /// Set the two-sided significance level
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    fn validate(&self) -> Result<()> {
        validate_paired(self.x, self.y, "Jackknife confidence interval")?;
        if self.x.len() <= 2 {
            return Err(Error::InsufficientData {
                expected: 3,
                actual: self.x.len(),
            });
        }
        validate_alpha(self.alpha)
    }

    /// Full-sample fit and the pseudo-values of every leave-one-out refit
    pub fn pseudo_values(&self) -> Result<(RegressionModel, JackknifePseudoValues)> {
        self.validate()?;
        let n = self.x.len();
        let global = self.estimator.calculate(self.x, self.y)?;

        let nf = n as f64;
        let mut slope = Vec::with_capacity(n);
        let mut intercept = Vec::with_capacity(n);
        let mut x_loo = Vec::with_capacity(n - 1);
        let mut y_loo = Vec::with_capacity(n - 1);

        for i in 0..n {
            x_loo.clear();
            y_loo.clear();
            x_loo.extend(self.x[..i].iter().chain(&self.x[i + 1..]));
            y_loo.extend(self.y[..i].iter().chain(&self.y[i + 1..]));

            let partial = self.estimator.calculate(&x_loo, &y_loo)?;
            slope.push(nf * global.slope - (nf - 1.0) * partial.slope);
            intercept.push(nf * global.intercept - (nf - 1.0) * partial.intercept);
        }

        Ok((global, JackknifePseudoValues { slope, intercept }))
    }
}

impl<E: RegressionEstimator> ConfidenceIntervalEstimator for JackknifeConfidenceInterval<'_, E> {
    #[instrument(skip(self), fields(n = self.x.len(), estimator = self.estimator.name()))]
    fn calculate(&self) -> Result<ConfidenceIntervalModel> {
        let (global, pseudo) = self.pseudo_values()?;
        let n = self.x.len();

        let slope_se = pseudo.slope_se();
        let intercept_se = pseudo.intercept_se();
        let t = students_t::quantile(1.0 - self.alpha / 2.0, (n - 2) as f64)?;
        debug!(slope_se, intercept_se, t, "Jackknife standard errors");

        let model = global
            .with_slope_limits(global.slope - t * slope_se, global.slope + t * slope_se)
            .with_intercept_limits(
                global.intercept - t * intercept_se,
                global.intercept + t * intercept_se,
            );

        Ok(ConfidenceIntervalModel::new(
            model,
            slope_se,
            intercept_se,
            self.confidence_level(),
        ))
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn name(&self) -> &str {
        "Jackknife"
    }
}
