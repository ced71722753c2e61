//! Passing-Bablok regression
//!
//! Non-parametric method-comparison regression based on the shifted median
//! of all pairwise slopes. Slopes are handled as angles `atan(dy/dx)` so that
//! vertical pairs have a finite representation.

use assay_core::{
    math::distributions::normal,
    numeric::{median, tolerant_difference, validate_alpha, validate_paired, DEFAULT_TOLERANCE},
    Error, RegressionEstimator, RegressionModel, Result, DEFAULT_ALPHA,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use tracing::{debug, instrument};

/// Marker for coincident pairs; sorts after every real angle
pub const UNDEFINED_ANGLE: f64 = 500.0;

/// Sorted pairwise angles of a paired sample, with the counts of steep
/// negative and positive angles needed to shift the median
#[derive(Debug, Clone, PartialEq)]
pub struct AngleMatrix {
    angles: Vec<f64>,
    n_observations: usize,
    n_valid: usize,
    n_neg: usize,
    n_neg_strict: usize,
    n_pos: usize,
    n_pos_strict: usize,
}

impl AngleMatrix {
    /// Build the angles of every unordered pair of observations
    ///
    /// Vertical pairs (`dx == 0`, `dy != 0`) get `±π/2` according to
    /// `positive_correlated`; coincident pairs get [`UNDEFINED_ANGLE`].
    pub fn build(x: &[f64], y: &[f64], positive_correlated: bool, tolerance: f64) -> Self {
        let n = x.len().min(y.len());
        let mut angles = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        let (mut n_neg, mut n_neg_strict, mut n_pos, mut n_pos_strict) = (0, 0, 0, 0);

        for k in 1..n {
            for j in 0..k {
                let dx = tolerant_difference(x[k], x[j], tolerance);
                let dy = tolerant_difference(y[k], y[j], tolerance);
                let angle = if dx != 0.0 {
                    (dy / dx).atan()
                } else if dy != 0.0 {
                    if positive_correlated {
                        FRAC_PI_2
                    } else {
                        -FRAC_PI_2
                    }
                } else {
                    angles.push(UNDEFINED_ANGLE);
                    continue;
                };

                if angle <= -FRAC_PI_4 {
                    n_neg += 1;
                    if angle < -FRAC_PI_4 {
                        n_neg_strict += 1;
                    }
                }
                if angle >= FRAC_PI_4 {
                    n_pos += 1;
                    if angle > FRAC_PI_4 {
                        n_pos_strict += 1;
                    }
                }
                angles.push(angle);
            }
        }

        angles.sort_by(f64::total_cmp);
        let n_valid = angles.iter().take_while(|&&a| a != UNDEFINED_ANGLE).count();

        Self {
            angles,
            n_observations: n,
            n_valid,
            n_neg,
            n_neg_strict,
            n_pos,
            n_pos_strict,
        }
    }

    /// All angles in ascending order, undefined pairs last
    pub fn sorted_angles(&self) -> &[f64] {
        &self.angles
    }

    /// Angles of the pairs with a defined slope
    pub fn valid_angles(&self) -> &[f64] {
        &self.angles[..self.n_valid]
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    pub fn n_valid(&self) -> usize {
        self.n_valid
    }

    /// Pairs with angle `≤ −π/4` and `< −π/4`
    pub fn negative_counts(&self) -> (usize, usize) {
        (self.n_neg, self.n_neg_strict)
    }

    /// Pairs with angle `≥ π/4` and `> π/4`
    pub fn positive_counts(&self) -> (usize, usize) {
        (self.n_pos, self.n_pos_strict)
    }

    /// Twice the median shift; a slope of exactly ∓1 counts half
    pub fn offset(&self, positive_correlated: bool) -> isize {
        if positive_correlated {
            (self.n_neg + self.n_neg_strict) as isize
        } else {
            -((self.n_pos + self.n_pos_strict) as isize)
        }
    }

    fn valid_angle(&self, index: isize) -> Option<f64> {
        if index >= 0 && (index as usize) < self.n_valid {
            Some(self.angles[index as usize])
        } else {
            None
        }
    }
}

/// Passing-Bablok regression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassingBablokRegression {
    alpha: f64,
    positive_correlated: bool,
    tolerance: f64,
}

impl PassingBablokRegression {
    /// Create with significance level `alpha` for the rank-based limits
    pub fn new(alpha: f64, positive_correlated: bool) -> Self {
        Self {
            alpha,
            positive_correlated,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Relative tolerance below which coordinate differences count as ties
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn positive_correlated(&self) -> bool {
        self.positive_correlated
    }

    /// Pairwise angle matrix for this estimator's correlation direction
    pub fn angle_matrix(&self, x: &[f64], y: &[f64]) -> Result<AngleMatrix> {
        validate_paired(x, y, "Passing-Bablok regression")?;
        Ok(AngleMatrix::build(
            x,
            y,
            self.positive_correlated,
            self.tolerance,
        ))
    }

    fn validate(&self, x: &[f64], y: &[f64]) -> Result<()> {
        validate_paired(x, y, "Passing-Bablok regression")?;
        if x.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: x.len(),
            });
        }
        validate_alpha(self.alpha)?;
        if !(self.tolerance >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Tie tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for PassingBablokRegression {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, true)
    }
}

impl RegressionEstimator for PassingBablokRegression {
    #[instrument(skip(self, x, y), fields(n = x.len(), alpha = self.alpha))]
    fn calculate(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel> {
        self.validate(x, y)?;

        let matrix = AngleMatrix::build(x, y, self.positive_correlated, self.tolerance);
        let offset = matrix.offset(self.positive_correlated);
        let m = matrix.n_valid() as isize + offset;
        debug!(
            n_valid = matrix.n_valid(),
            offset,
            "Passing-Bablok angle matrix"
        );

        let out_of_range = || {
            Error::NumericDomain(format!(
                "Shifted median rank falls outside the {} defined pairwise slopes",
                matrix.n_valid()
            ))
        };
        if m <= 0 {
            return Err(out_of_range());
        }
        let slope_angle = if m % 2 == 1 {
            matrix.valid_angle((m - 1) / 2).ok_or_else(out_of_range)?
        } else {
            let lower = matrix.valid_angle(m / 2 - 1).ok_or_else(out_of_range)?;
            let upper = matrix.valid_angle(m / 2).ok_or_else(out_of_range)?;
            0.5 * (lower + upper)
        };
        let slope = slope_angle.tan();

        let n = matrix.n_observations() as f64;
        let z = normal::quantile(1.0 - self.alpha / 2.0)?;
        let d_conf = (z * (n * (n - 1.0) * (2.0 * n + 5.0) / 18.0).sqrt()).round() as isize;
        let m1 = ((m - d_conf) as f64 / 2.0).round() as isize;
        let lower_index = m1 - 1;
        let upper_index = m - m1;
        debug!(d_conf, lower_index, upper_index, "Passing-Bablok rank limits");

        let slope_lcl = matrix.valid_angle(lower_index).map_or(f64::NAN, f64::tan);
        let slope_ucl = matrix.valid_angle(upper_index).map_or(f64::NAN, f64::tan);

        let intercept_for = |b: f64| -> f64 {
            if b.is_nan() {
                return f64::NAN;
            }
            let residuals: Vec<f64> = x.iter().zip(y).map(|(&xi, &yi)| yi - b * xi).collect();
            median(&residuals)
        };

        Ok(RegressionModel::new(intercept_for(slope), slope)
            .with_slope_limits(slope_lcl, slope_ucl)
            .with_intercept_limits(intercept_for(slope_ucl), intercept_for(slope_lcl)))
    }

    fn name(&self) -> &str {
        "Passing-Bablok"
    }

    fn computes_limits(&self) -> bool {
        true
    }
}
