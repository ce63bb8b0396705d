//! Benchmark correlation check result.

use serde::{Deserialize, Serialize};

/// Pearson correlation against the benchmark and whether it restricts size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationCheck {
    /// Correlation coefficient; 0 when it could not be estimated.
    pub correlation: f64,
    /// Whether the exposure cap must be reduced.
    pub reduce: bool,
    /// Aligned observations used.
    pub observations: usize,
}

impl CorrelationCheck {
    /// Neutral result used when data is missing.
    #[must_use]
    pub const fn neutral(observations: usize) -> Self {
        Self {
            correlation: 0.0,
            reduce: false,
            observations,
        }
    }
}
