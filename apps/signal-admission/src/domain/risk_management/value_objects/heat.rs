//! Portfolio heat value objects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::Symbol;

/// Heat band relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeatLevel {
    /// Below the warning threshold.
    Safe,
    /// At or above the warning threshold.
    Warning,
    /// At or above the heat limit; no new entries.
    Limit,
}

impl fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Warning => write!(f, "WARNING"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Risk and exposure contributed by one open position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHeat {
    /// Ticker.
    pub symbol: Symbol,
    /// Committed risk fraction.
    pub risk: Decimal,
    /// Capital tied up (quantity × entry).
    pub exposure: Decimal,
}

/// Snapshot of committed risk across the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatStatus {
    /// Sum of committed risk fractions.
    pub current_heat: Decimal,
    /// Configured heat limit.
    pub max_heat: Decimal,
    /// Remaining budget, never negative.
    pub available_heat: Decimal,
    /// Heat band.
    pub status: HeatLevel,
    /// Sum of position exposures.
    pub total_exposure: Decimal,
    /// Uncommitted capital as a fraction of total capital.
    pub cash_reserve_pct: Decimal,
    /// Whether the cash reserve meets its target.
    pub cash_reserve_ok: bool,
    /// Per-position breakdown.
    pub positions: Vec<PositionHeat>,
}

/// Heat after adding a new trade's risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatProjection {
    /// Current heat plus the candidate's risk.
    pub projected_heat: Decimal,
    /// Whether the projection is strictly above the limit.
    pub would_exceed: bool,
}
