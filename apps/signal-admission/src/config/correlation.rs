//! Benchmark correlation configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::constants::{CORRELATION_CAP_FACTOR, CORRELATION_LOOKBACK_DAYS};

/// Correlation guard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Daily observations required.
    #[serde(default = "default_lookback")]
    pub lookback_days: usize,
    /// Multiplier applied to the exposure cap when correlation is high.
    #[serde(default = "default_haircut")]
    pub cap_factor: Decimal,
    /// Benchmark index symbol.
    #[serde(default = "default_benchmark")]
    pub benchmark: String,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback(),
            cap_factor: default_haircut(),
            benchmark: default_benchmark(),
        }
    }
}

const fn default_lookback() -> usize {
    CORRELATION_LOOKBACK_DAYS
}

const fn default_haircut() -> Decimal {
    CORRELATION_CAP_FACTOR
}

fn default_benchmark() -> String {
    "IHSG".to_string()
}
