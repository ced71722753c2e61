//! Ordinary least squares baseline
//!
//! Treats the comparative method as error-free. Useful as the λ → 0 limit
//! of Deming regression and as a reference line in reports.

use assay_core::{
    numeric::validate_paired, DeviationSums, Error, RegressionEstimator, RegressionModel, Result,
};
use tracing::instrument;

/// Least-squares regression of `y` on `x`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdinaryLeastSquares;

impl RegressionEstimator for OrdinaryLeastSquares {
    #[instrument(skip(self, x, y), fields(n = x.len()))]
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
        validate_paired(x, y, "Least-squares regression")?;

        let sums = DeviationSums::new(x, y);
        if sums.u == 0.0 {
            return Err(Error::NumericDomain(
                "Least-squares slope is undefined for constant x".to_string(),
            ));
        }
        let slope = sums.p / sums.u;
        let intercept = sums.mean_y - slope * sums.mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(Error::non_finite("Least-squares coefficients"));
        }

        Ok(RegressionModel::new(intercept, slope))
    }

    fn name(&self) -> &str {
        "Ordinary least squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_textbook_sample() {
        let model = OrdinaryLeastSquares
            .calculate(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 1.0, 2.0, 2.0, 4.0])
            .unwrap();
        assert_relative_eq!(model.slope, 0.7, epsilon = 1e-12);
        assert_relative_eq!(model.intercept, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_values_allowed() {
        let model = OrdinaryLeastSquares
            .calculate(&[-2.0, -1.0, 0.0, 1.0], &[-3.0, -1.0, 1.0, 3.0])
            .unwrap();
        assert_relative_eq!(model.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(model.intercept, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_x() {
        let result = OrdinaryLeastSquares.calculate(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(Error::NumericDomain(_))));
    }
}
