//! Deming regression
//!
//! Closed-form errors-in-variables fit for method comparison when both
//! methods carry constant (homoscedastic) measurement error.

use assay_core::{
    numeric::{validate_non_negative, validate_paired},
    DeviationSums, Error, RegressionEstimator, RegressionModel, Result,
};
use tracing::{debug, instrument};

/// Default ratio of the x-method to y-method error variances
pub const DEFAULT_ERROR_RATIO: f64 = 1.0;

/// Deming regression with a fixed error-variance ratio λ
///
/// Given deviation sums `u = Σ(x−x̄)²`, `q = Σ(y−ȳ)²`, `p = Σ(x−x̄)(y−ȳ)`:
///
/// ```text
/// b1 = (λq − u + sqrt((u − λq)² + 4λp²)) / (2λp)
/// b0 = ȳ − b1·x̄
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemingRegression {
    error_ratio: f64,
}

impl DemingRegression {
    /// Create a Deming estimator with error-variance ratio `error_ratio`
    pub fn new(error_ratio: f64) -> Self {
        Self { error_ratio }
    }

    pub fn error_ratio(&self) -> f64 {
        self.error_ratio
    }
}

impl Default for DemingRegression {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_RATIO)
    }
}

/// Shared entry validation for the Deming family
pub(crate) fn validate_deming_input(
    x: &[f64],
    y: &[f64],
    error_ratio: f64,
    context: &str,
) -> Result<()> {
    validate_paired(x, y, context)?;
    if !(error_ratio > 0.0) || !error_ratio.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "Error ratio must be positive and finite, got {error_ratio}"
        )));
    }
    validate_non_negative(x, y, context)
}

/// Root of the Deming quadratic for the given deviation sums
pub(crate) fn deming_line(sums: &DeviationSums, error_ratio: f64) -> Result<(f64, f64)> {
    let DeviationSums {
        mean_x,
        mean_y,
        u,
        q,
        p,
    } = *sums;
    if p == 0.0 {
        return Err(Error::NumericDomain(
            "Deming slope is undefined when the cross-product sum is zero".to_string(),
        ));
    }

    let lambda = error_ratio;
    let discriminant = (u - lambda * q).powi(2) + 4.0 * lambda * p * p;
    let slope = (lambda * q - u + discriminant.sqrt()) / (2.0 * lambda * p);
    let intercept = mean_y - slope * mean_x;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(Error::non_finite("Deming coefficients"));
    }
    Ok((intercept, slope))
}

impl RegressionEstimator for DemingRegression {
    #[instrument(skip(self, x, y), fields(n = x.len(), error_ratio = self.error_ratio))]
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
        validate_deming_input(x, y, self.error_ratio, "Deming regression")?;

        let sums = DeviationSums::new(x, y);
        let (intercept, slope) = deming_line(&sums, self.error_ratio)?;
        debug!(slope, intercept, "Deming fit");

        Ok(RegressionModel::new(intercept, slope))
    }

    fn name(&self) -> &str {
        "Deming"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line_is_recovered() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 + 1.5 * v).collect();
        let model = DemingRegression::default().calculate(&x, &y).unwrap();
        assert_relative_eq!(model.slope, 1.5, epsilon = 1e-12);
        assert_relative_eq!(model.intercept, 2.0, epsilon = 1e-12);
        assert!(!model.has_slope_limits());
    }

    #[test]
    fn test_small_sample_against_closed_form() {
        // u = 10, q = 6, p = 7: b1 = (6 - 10 + sqrt(16 + 196)) / 14
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 1.0, 2.0, 2.0, 4.0];
        let model = DemingRegression::new(1.0).calculate(&x, &y).unwrap();
        let expected = (-4.0 + 212.0_f64.sqrt()) / 14.0;
        assert_relative_eq!(model.slope, expected, epsilon = 1e-12);
        assert_relative_eq!(model.slope, 0.754_301_412_754_359_7, epsilon = 1e-12);
        assert_relative_eq!(model.intercept, 2.0 - 3.0 * expected, epsilon = 1e-12);
    }

    #[test]
    fn test_error_ratio_limits() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 1.0, 2.0, 2.0, 4.0];
        // λ -> 0: error-free x, the fit approaches y-on-x least squares p/u
        let model = DemingRegression::new(1e-9).calculate(&x, &y).unwrap();
        assert_relative_eq!(model.slope, 0.7, epsilon = 1e-6);
        // λ -> ∞: error-free y, the fit approaches the inverted x-on-y line q/p
        let model = DemingRegression::new(1e9).calculate(&x, &y).unwrap();
        assert_relative_eq!(model.slope, 6.0 / 7.0, epsilon = 1e-6);
    }

    #[test]
    fn test_validation() {
        let est = DemingRegression::default();
        assert!(matches!(
            est.calculate(&[1.0, 2.0], &[1.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(est.calculate(&[], &[]), Err(Error::InvalidInput(_))));
        assert!(matches!(
            est.calculate(&[1.0, -2.0, 3.0], &[1.0, 2.0, 3.0]),
            Err(Error::InvalidInput(_))
        ));
        for ratio in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                DemingRegression::new(ratio).calculate(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_constant_data_is_a_domain_error() {
        let result = DemingRegression::default().calculate(&[2.0, 2.0, 2.0], &[1.0, 3.0, 5.0]);
        assert!(matches!(result, Err(Error::NumericDomain(_))));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let x = [1.0, 2.5, 3.1, 4.7, 5.2];
        let y = [1.2, 2.4, 3.3, 4.1, 5.9];
        let est = DemingRegression::new(0.8);
        let first = est.calculate(&x, &y).unwrap();
        assert!(first.bits_eq(&est.calculate(&x, &y).unwrap()));
    }
}
