//! Error types for method-validation statistics
//!
//! Provides a unified error type for all assay-stats crates.

use thiserror::Error;

/// Core error type for estimation and variance-component analysis
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to an estimator or analyzer
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Nested design whose cell counts do not multiply out to the observation count
    #[error(
        "Unbalanced design: {days} days x {runs} runs x {replicates} replicates != {observations} observations"
    )]
    UnbalancedDesign {
        days: usize,
        runs: usize,
        replicates: usize,
        observations: usize,
    },

    /// Degenerate input that would force a division by zero or similar
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    /// A reference distribution could not be constructed
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::InvalidInput(format!("{operation} requires at least one observation"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a significance level outside (0, 1)
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidParameter(format!("Significance level {alpha} must be in (0, 1)"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::NumericDomain(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error rejects the caller's input rather than the computation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::InvalidParameter(_) | Self::InsufficientData { .. }
        )
    }
}
