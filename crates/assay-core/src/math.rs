//! Reference distribution quantiles
//!
//! Thin wrappers over `statrs` that map construction failures into the crate
//! error type. Used by the rank-based slope limits, the jackknife t interval
//! and the chi-square precision limits.

/// Distribution-related mathematical functions
pub mod distributions {
    /// Standard normal distribution
    pub mod normal {
        use crate::{Error, Result};
        use statrs::distribution::{ContinuousCDF, Normal};

        fn standard() -> Result<Normal> {
            Normal::new(0.0, 1.0).map_err(|e| {
                Error::Distribution(format!("Failed to create normal distribution: {e}"))
            })
        }

        /// Quantile function of the standard normal
        pub fn quantile(p: f64) -> Result<f64> {
            Ok(standard()?.inverse_cdf(p))
        }
    }

    /// Student's t distribution
    pub mod students_t {
        use crate::{Error, Result};
        use statrs::distribution::{ContinuousCDF, StudentsT};

        /// Quantile of the t distribution with `df` degrees of freedom
        pub fn quantile(p: f64, df: f64) -> Result<f64> {
            if df <= 0.0 {
                return Err(Error::InvalidInput(
                    "Not enough data for t-distribution".to_string(),
                ));
            }
            let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
                Error::Distribution(format!("Failed to create t-distribution: {e}"))
            })?;
            Ok(t_dist.inverse_cdf(p))
        }
    }

    /// Chi-square distribution
    pub mod chi_squared {
        use crate::{Error, Result};
        use statrs::distribution::{ChiSquared, ContinuousCDF};

        const MAX_BISECTIONS: usize = 200;

        fn distribution(df: f64) -> Result<ChiSquared> {
            if !(df > 0.0) || !df.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "Chi-square degrees of freedom must be positive and finite, got {df}"
                )));
            }
            ChiSquared::new(df).map_err(|e| {
                Error::Distribution(format!("Failed to create chi-square distribution: {e}"))
            })
        }

        /// Lower-tail quantile with `df` (possibly fractional) degrees of freedom
        ///
        /// Brackets the root by doubling, then bisects until the bracket
        /// stops shrinking in double precision.
        pub fn quantile(p: f64, df: f64) -> Result<f64> {
            if !(p > 0.0 && p < 1.0) {
                return Err(Error::InvalidParameter(format!(
                    "Chi-square probability {p} must be in (0, 1)"
                )));
            }
            let dist = distribution(df)?;

            let mut low = 0.0_f64;
            let mut high = df.max(1.0);
            while dist.cdf(high) < p {
                low = high;
                high *= 2.0;
            }

            for _ in 0..MAX_BISECTIONS {
                let mid = 0.5 * (low + high);
                if mid <= low || mid >= high {
                    break;
                }
                if dist.cdf(mid) < p {
                    low = mid;
                } else {
                    high = mid;
                }
            }
            Ok(0.5 * (low + high))
        }
    }

}
