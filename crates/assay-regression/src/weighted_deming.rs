//! Weighted Deming regression for constant-CV measurement error
//!
//! Starts from the unweighted Deming fit and iteratively reweights each
//! point by the inverse square of its projected true value, solving the
//! Deming quadratic on the weighted deviation sums at every step.

use crate::{
    deming::{deming_line, validate_deming_input, DEFAULT_ERROR_RATIO},
    DemingRegression, IterationOutcome,
};
use assay_core::{DeviationSums, Error, RegressionEstimator, RegressionModel, Result};
use tracing::{debug, instrument, warn};

/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 30;

/// Default stopping threshold on the coefficient change between iterations
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-6;

/// Parameters for weighted Deming regression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedDemingParameters {
    /// Ratio of the x-method to y-method error variances
    pub error_ratio: f64,
    /// Hard cap on reweighting steps
    pub max_iterations: usize,
    /// Both coefficients must move less than this to stop
    pub convergence_threshold: f64,
}

impl Default for WeightedDemingParameters {
    fn default() -> Self {
        Self {
            error_ratio: DEFAULT_ERROR_RATIO,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
        }
    }
}

/// Weighted Deming regression (Linnet's constant-CV model)
///
/// Each step computes residuals `d = y − (b0 + b1·x)`, projected points
///
/// ```text
/// x̂ = x + λ·b1·d / (1 + λ·b1²)
/// ŷ = y − d / (1 + λ·b1²)
/// w = ((x̂ + λ·ŷ) / (1 + λ))⁻²
/// ```
///
/// and refits the Deming line on the `w`-weighted deviation sums.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedDemingRegression {
    params: WeightedDemingParameters,
}

impl WeightedDemingRegression {
    /// Create with all parameters
    pub fn new(error_ratio: f64, max_iterations: usize, convergence_threshold: f64) -> Self {
        Self {
            params: WeightedDemingParameters {
                error_ratio,
                max_iterations,
                convergence_threshold,
            },
        }
    }

    pub fn with_params(params: WeightedDemingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &WeightedDemingParameters {
        &self.params
    }

    fn validate(&self, x: &[f64], y: &[f64]) -> Result<()> {
        validate_deming_input(x, y, self.params.error_ratio, "Weighted Deming regression")?;
        if self.params.max_iterations == 0 {
            return Err(Error::InvalidParameter(
                "Maximum iterations must be positive".to_string(),
            ));
        }
        let threshold = self.params.convergence_threshold;
        if !(threshold > 0.0) || !threshold.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "Convergence threshold must be positive and finite, got {threshold}"
            )));
        }
        Ok(())
    }

    /// Fit and report whether the iteration converged
    ///
    /// Exhausting `max_iterations` is not an error: the last iterate is
    /// returned with `converged == false`.
    #[instrument(skip(self, x, y), fields(n = x.len(), error_ratio = self.params.error_ratio))]
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Result<IterationOutcome<RegressionModel>> {
        self.validate(x, y)?;

        let lambda = self.params.error_ratio;
        let initial = DemingRegression::new(lambda).calculate(x, y)?;
        let (mut b0, mut b1) = (initial.intercept, initial.slope);
        let mut weights = vec![0.0; x.len()];

        for iteration in 1..=self.params.max_iterations {
            let shrink = 1.0 + lambda * b1 * b1;
            for ((w, &xi), &yi) in weights.iter_mut().zip(x).zip(y) {
                let d = yi - (b0 + b1 * xi);
                let x_hat = xi + lambda * b1 * d / shrink;
                let y_hat = yi - d / shrink;
                let level = (x_hat + lambda * y_hat) / (1.0 + lambda);
                *w = 1.0 / (level * level);
            }
            if weights.iter().any(|w| !w.is_finite()) {
                return Err(Error::NumericDomain(
                    "Weighted Deming weight is undefined for a point projected onto zero"
                        .to_string(),
                ));
            }

            let sums = DeviationSums::weighted(x, y, &weights);
            let (next_b0, next_b1) = deming_line(&sums, lambda)?;
            let converged = (next_b0 - b0).abs() < self.params.convergence_threshold
                && (next_b1 - b1).abs() < self.params.convergence_threshold;
            b0 = next_b0;
            b1 = next_b1;
            debug!(iteration, intercept = b0, slope = b1, "Weighted Deming step");

            if converged {
                return Ok(IterationOutcome::converged(
                    RegressionModel::new(b0, b1),
                    iteration,
                ));
            }
        }

        Ok(IterationOutcome::exhausted(
            RegressionModel::new(b0, b1),
            self.params.max_iterations,
        ))
    }
}

impl RegressionEstimator for WeightedDemingRegression {
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
        let outcome = self.fit(x, y)?;
        if !outcome.converged {
            warn!(
                iterations = outcome.iterations,
                threshold = self.params.convergence_threshold,
                "Weighted Deming regression did not converge; returning last iterate"
            );
        }
        Ok(outcome.into_value())
    }

    fn name(&self) -> &str {
        "Weighted Deming"
    }
}
