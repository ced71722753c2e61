//! Satterthwaite degrees of freedom and chi-square limits
//!
//! A variance estimated as a linear combination `Σ cᵢ·MSᵢ` of independent mean
//! squares is approximately scaled chi-square with
//!
//! ```text
//! df = (Σ cᵢ·MSᵢ)² / Σ ((cᵢ·MSᵢ)² / dfᵢ)
//! ```

use crate::SdLimits;
use assay_core::{math::distributions::chi_squared, numeric::validate_alpha, Error, Result};

/// One `c·MS` term with the degrees of freedom of its mean square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanSquareTerm {
    pub coefficient: f64,
    pub mean_square: f64,
    pub df: f64,
}

impl MeanSquareTerm {
    pub fn new(coefficient: f64, mean_square: f64, df: f64) -> Self {
        Self {
            coefficient,
            mean_square,
            df,
        }
    }
}

/// Effective degrees of freedom of `Σ cᵢ·MSᵢ`; zero-coefficient terms drop out
pub fn satterthwaite_df(terms: &[MeanSquareTerm]) -> Result<f64> {
    let mut combined = 0.0;
    let mut denominator = 0.0;
    for term in terms.iter().filter(|t| t.coefficient != 0.0) {
        if !(term.df > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Mean square degrees of freedom must be positive, got {}",
                term.df
            )));
        }
        let weighted = term.coefficient * term.mean_square;
        combined += weighted;
        denominator += weighted * weighted / term.df;
    }

    if !(denominator > 0.0) {
        return Err(Error::NumericDomain(
            "Satterthwaite degrees of freedom are undefined when every term vanishes".to_string(),
        ));
    }
    Ok(combined * combined / denominator)
}

/// Two-sided chi-square limits for a standard deviation on `df` degrees of freedom
///
/// `lower = sd·sqrt(df/χ²(1 − α/2, df))`, `upper = sd·sqrt(df/χ²(α/2, df))`.
pub fn sd_confidence_limits(sd: f64, df: f64, alpha: f64) -> Result<SdLimits> {
    validate_alpha(alpha)?;
    let chi_upper_tail = chi_squared::quantile(1.0 - alpha / 2.0, df)?;
    let chi_lower_tail = chi_squared::quantile(alpha / 2.0, df)?;
    Ok(SdLimits {
        lower: sd * (df / chi_upper_tail).sqrt(),
        upper: sd * (df / chi_lower_tail).sqrt(),
        df,
        confidence_level: 1.0 - alpha,
    })
}

/// SD-scale verification factor `sqrt(χ²(1 − α/levels, df)/df)`
///
/// Multiplying a claimed CV by this factor gives the upper verification
/// limit; `levels` applies a Bonferroni correction across concentration levels.
pub fn verification_factor(df: f64, alpha: f64, levels: usize) -> Result<f64> {
    validate_alpha(alpha)?;
    if levels == 0 {
        return Err(Error::InvalidParameter(
            "Number of levels must be positive".to_string(),
        ));
    }
    let chi = chi_squared::quantile(1.0 - alpha / levels as f64, df)?;
    Ok((chi / df).sqrt())
}
