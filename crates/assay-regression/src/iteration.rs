//! Outcome of a bounded fixed-point iteration

use serde::{Deserialize, Serialize};

/// Result of an iteration capped at a maximum number of steps
///
/// `converged == false` means the cap was reached before the stopping rule
/// was met; `value` then holds the last iterate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationOutcome<T> {
    pub converged: bool,
    pub iterations: usize,
    pub value: T,
}

impl<T> IterationOutcome<T> {
    pub fn converged(value: T, iterations: usize) -> Self {
        Self {
            converged: true,
            iterations,
            value,
        }
    }

    pub fn exhausted(value: T, iterations: usize) -> Self {
        Self {
            converged: false,
            iterations,
            value,
        }
    }

    /// Discard the convergence flag
    pub fn into_value(self) -> T {
        self.value
    }
}
