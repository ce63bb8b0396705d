//! Position sizing output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::exposure_cap::AppliedCap;

/// Result of converting a risk budget into whole lots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Capital × risk fraction.
    pub risk_amount: Decimal,
    /// Entry minus stop.
    pub stop_distance: Decimal,
    /// Stop distance as a fraction of entry.
    pub stop_distance_pct: Decimal,
    /// Shares, always a multiple of the lot size.
    pub shares: u64,
    /// Whole lots.
    pub lots: u64,
    /// Shares × entry, in rupiah.
    pub exposure: Decimal,
    /// Exposure as a fraction of capital.
    pub exposure_pct: Decimal,
    /// Cap the size was checked against.
    pub applied_cap: AppliedCap,
    /// Whether the cap reduced the size.
    pub capped: bool,
    /// Non-blocking warnings.
    pub warnings: Vec<String>,
}

impl SizingResult {
    /// Risk actually taken at this size, as a fraction of capital.
    #[must_use]
    pub fn actual_risk(&self, capital: Decimal) -> Decimal {
        if capital <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        Decimal::from(self.shares)
            .saturating_mul(self.stop_distance)
            .checked_div(capital)
            .unwrap_or(Decimal::MAX)
    }
}
