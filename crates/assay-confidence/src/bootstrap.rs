//! Bootstrap confidence limits for regression coefficients
//!
//! Resample indices are drawn sequentially from a single RNG so that a seed
//! fully determines the resamples; the refits themselves are independent and
//! run on rayon when the `parallel` feature is enabled.

use crate::{
    bootstrap_methods::PercentileBootstrap, ConfidenceInterval, ConfidenceIntervalEstimator,
    ConfidenceIntervalModel, DEFAULT_RESAMPLES,
};
use assay_core::{
    numeric::{validate_alpha, validate_paired},
    Error, RegressionEstimator, RegressionModel, Result, DEFAULT_ALPHA,
};
use rand::prelude::*;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

/// Bootstrap method for calculating confidence intervals
///
/// This trait defines how to construct a confidence interval from
/// bootstrap estimates. Different methods (percentile, basic, etc.)
/// implement this trait.
pub trait BootstrapMethod: Clone + Send + Sync {
    /// Calculate confidence interval from bootstrap distribution
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval>;

    /// Method name for documentation
    fn name(&self) -> &'static str;
}

/// Coefficients refitted on every successful resample
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapDistribution {
    pub slopes: Vec<f64>,
    pub intercepts: Vec<f64>,
    /// Resamples the estimator could not fit
    pub failed: usize,
}

impl BootstrapDistribution {
    pub fn successful(&self) -> usize {
        self.slopes.len()
    }
}

/// Percentile (by default) bootstrap interval around any regression estimator
#[derive(Debug, Clone)]
pub struct BootstrapConfidenceInterval<'a, E, M = PercentileBootstrap> {
    x: &'a [f64],
    y: &'a [f64],
    estimator: E,
    method: M,
    n_resamples: usize,
    alpha: f64,
    seed: Option<u64>,
}

impl<'a, E> BootstrapConfidenceInterval<'a, E, PercentileBootstrap>
where
    E: RegressionEstimator + Sync,
{
    pub fn new(x: &'a [f64], y: &'a [f64], estimator: E) -> Self {
        Self {
            x,
            y,
            estimator,
            method: PercentileBootstrap,
            n_resamples: DEFAULT_RESAMPLES,
            alpha: DEFAULT_ALPHA,
            seed: None,
        }
    }
}

impl<'a, E, M> BootstrapConfidenceInterval<'a, E, M>
where
    E: RegressionEstimator + Sync,
    M: BootstrapMethod,
{
    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        self.n_resamples = n_resamples;
        self
    }

    /// Set the two-sided significance level
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the interval rule
    pub fn with_method<M2: BootstrapMethod>(self, method: M2) -> BootstrapConfidenceInterval<'a, E, M2> {
        BootstrapConfidenceInterval {
            x: self.x,
            y: self.y,
            estimator: self.estimator,
            method,
            n_resamples: self.n_resamples,
            alpha: self.alpha,
            seed: self.seed,
        }
    }

    pub fn n_resamples(&self) -> usize {
        self.n_resamples
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    fn validate(&self) -> Result<()> {
        validate_paired(self.x, self.y, "Bootstrap confidence interval")?;
        if self.x.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: self.x.len(),
            });
        }
        if self.n_resamples == 0 {
            return Err(Error::InvalidParameter(
                "Number of resamples must be positive".to_string(),
            ));
        }
        validate_alpha(self.alpha)
    }

    /// Draw resample indices: `n_resamples` vectors of `n` indices with replacement
    fn draw_indices<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        let n = self.x.len();
        (0..self.n_resamples)
            .map(|_| (0..n).map(|_| rng.gen_range(0..n)).collect())
            .collect()
    }

    fn fit_resample(&self, indices: &[usize]) -> Result<RegressionModel> {
        let x: Vec<f64> = indices.iter().map(|&i| self.x[i]).collect();
        let y: Vec<f64> = indices.iter().map(|&i| self.y[i]).collect();
        self.estimator.calculate(&x, &y)
    }

    /// Refit the estimator on every resample drawn from `rng`
    pub fn distribution_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BootstrapDistribution> {
        self.validate()?;
        let indices = self.draw_indices(rng);

        #[cfg(feature = "parallel")]
        let fits: Vec<Result<RegressionModel>> =
            indices.par_iter().map(|idx| self.fit_resample(idx)).collect();
        #[cfg(not(feature = "parallel"))]
        let fits: Vec<Result<RegressionModel>> =
            indices.iter().map(|idx| self.fit_resample(idx)).collect();

        let mut distribution = BootstrapDistribution {
            slopes: Vec::with_capacity(fits.len()),
            intercepts: Vec::with_capacity(fits.len()),
            failed: 0,
        };
        for fit in fits {
            match fit {
                Ok(model) if model.slope.is_finite() && model.intercept.is_finite() => {
                    distribution.slopes.push(model.slope);
                    distribution.intercepts.push(model.intercept);
                }
                _ => distribution.failed += 1,
            }
        }

        if distribution.failed > 0 {
            warn!(
                failed = distribution.failed,
                resamples = self.n_resamples,
                estimator = self.estimator.name(),
                "Skipped bootstrap resamples the estimator could not fit"
            );
        }
        if distribution.slopes.is_empty() {
            return Err(Error::NumericDomain(format!(
                "{} could not be fitted on any of {} bootstrap resamples",
                self.estimator.name(),
                self.n_resamples
            )));
        }
        Ok(distribution)
    }

    /// Full calculation with an injected random source
    #[instrument(skip(self, rng), fields(n = self.x.len(), resamples = self.n_resamples, estimator = self.estimator.name()))]
    pub fn calculate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ConfidenceIntervalModel> {
        self.validate()?;
        let global = self.estimator.calculate(self.x, self.y)?;
        let distribution = self.distribution_with_rng(rng)?;
        debug!(
            successful = distribution.successful(),
            failed = distribution.failed,
            method = self.method.name(),
            "Bootstrap distribution collected"
        );

        let level = self.confidence_level();
        let slope = self
            .method
            .calculate_interval(&distribution.slopes, global.slope, level)?;
        let intercept = self
            .method
            .calculate_interval(&distribution.intercepts, global.intercept, level)?;

        let model = global
            .with_slope_limits(slope.lower, slope.upper)
            .with_intercept_limits(intercept.lower, intercept.upper);
        Ok(ConfidenceIntervalModel::new(model, f64::NAN, f64::NAN, level))
    }
}

impl<E, M> ConfidenceIntervalEstimator for BootstrapConfidenceInterval<'_, E, M>
where
    E: RegressionEstimator + Sync,
    M: BootstrapMethod,
{
    /// Uses the configured seed, or thread-local entropy when none is set
    fn calculate(&self) -> Result<ConfidenceIntervalModel> {
        match self.seed {
            Some(seed) => self.calculate_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.calculate_with_rng(&mut thread_rng()),
        }
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn name(&self) -> &str {
        self.method.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BasicBootstrap;
    use assay_core::DeviationSums;
    use rand_chacha::ChaCha8Rng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct LeastSquares;

    impl RegressionEstimator for LeastSquares {
        fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
            let sums = DeviationSums::new(x, y);
            if sums.u == 0.0 {
                return Err(Error::NumericDomain("constant x".to_string()));
            }
            let slope = sums.p / sums.u;
            Ok(RegressionModel::new(sums.mean_y - slope * sums.mean_x, slope))
        }

        fn name(&self) -> &str {
            "LS"
        }
    }

    /// Fits the full sample once, then fails on every resample
    struct FailsAfterFirst(AtomicUsize);

    impl RegressionEstimator for FailsAfterFirst {
        fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                LeastSquares.calculate(x, y)
            } else {
                Err(Error::NumericDomain("refit refused".to_string()))
            }
        }

        fn name(&self) -> &str {
            "fails after first"
        }
    }

    const X: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    const Y: [f64; 10] = [1.2, 1.9, 3.3, 3.8, 5.1, 6.2, 6.8, 8.1, 9.2, 9.9];

    #[test]
    fn test_same_seed_same_limits() {
        let boot = BootstrapConfidenceInterval::new(&X, &Y, LeastSquares)
            .with_resamples(300)
            .with_seed(42);
        let first = boot.calculate().unwrap();
        let second = boot.calculate().unwrap();
        // SEs are NaN for the percentile rule, so compare the fitted models
        assert_eq!(first.model, second.model);

        let with_rng = boot
            .calculate_with_rng(&mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        let again = boot
            .calculate_with_rng(&mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        assert_eq!(with_rng.model, again.model);
    }

    #[test]
    fn test_point_estimate_is_global_fit() {
        let global = LeastSquares.calculate(&X, &Y).unwrap();
        let result = BootstrapConfidenceInterval::new(&X, &Y, LeastSquares)
            .with_resamples(200)
            .calculate_with_rng(&mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        assert_eq!(result.slope(), global.slope);
        assert_eq!(result.intercept(), global.intercept);
        assert!(result.slope_se.is_nan());
        assert!(result.intercept_se.is_nan());
        assert!(result.slope_lcl() <= result.slope_ucl());
        assert!(result.intercept_lcl() <= result.intercept_ucl());
    }

    #[test]
    fn test_failed_resamples_are_skipped() {
        let x = [1.0, 1.0, 1.0, 1.0, 2.0];
        let y = [1.0, 1.1, 0.9, 1.0, 2.0];
        let boot = BootstrapConfidenceInterval::new(&x, &y, LeastSquares).with_resamples(200);
        let distribution = boot
            .distribution_with_rng(&mut ChaCha8Rng::seed_from_u64(7))
            .unwrap();
        assert!(distribution.failed > 0);
        assert_eq!(distribution.successful() + distribution.failed, 200);
    }

    #[test]
    fn test_all_resamples_failing_is_an_error() {
        let boot = BootstrapConfidenceInterval::new(&X, &Y, FailsAfterFirst(AtomicUsize::new(0)))
            .with_resamples(20);
        let result = boot.calculate_with_rng(&mut ChaCha8Rng::seed_from_u64(3));
        assert!(matches!(result, Err(Error::NumericDomain(_))));
    }

    #[test]
    fn test_alternative_method() {
        let boot = BootstrapConfidenceInterval::new(&X, &Y, LeastSquares)
            .with_resamples(200)
            .with_method(BasicBootstrap);
        assert_eq!(boot.name(), "Basic Bootstrap");
        let result = boot
            .calculate_with_rng(&mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        assert!(result.slope_lcl() <= result.slope_ucl());
    }

    #[test]
    fn test_validation() {
        let boot = BootstrapConfidenceInterval::new(&X, &Y, LeastSquares).with_resamples(0);
        assert!(matches!(boot.calculate(), Err(Error::InvalidParameter(_))));
        let boot = BootstrapConfidenceInterval::new(&X[..1], &Y[..1], LeastSquares);
        assert!(matches!(boot.calculate(), Err(Error::InsufficientData { .. })));
        let boot = BootstrapConfidenceInterval::new(&X, &Y[..3], LeastSquares);
        assert!(matches!(boot.calculate(), Err(Error::InvalidInput(_))));
    }
}
