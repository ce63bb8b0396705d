//! Position sizing configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::constants::{
    LOT_SIZE, MAX_RISK_PER_TRADE, WIDE_STOP_THRESHOLD,
};

/// Lot rounding and sizing guard rails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Shares per exchange lot.
    #[serde(default = "default_lot_size")]
    pub lot_size: u64,
    /// Stop distance (fraction of entry) above which a warning is attached.
    #[serde(default = "default_wide_stop")]
    pub wide_stop_warning: Decimal,
    /// Absolute ceiling on risk per trade.
    #[serde(default = "default_max_risk")]
    pub max_risk_per_trade: Decimal,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            lot_size: default_lot_size(),
            wide_stop_warning: default_wide_stop(),
            max_risk_per_trade: default_max_risk(),
        }
    }
}

const fn default_lot_size() -> u64 {
    LOT_SIZE
}

const fn default_wide_stop() -> Decimal {
    WIDE_STOP_THRESHOLD
}

const fn default_max_risk() -> Decimal {
    MAX_RISK_PER_TRADE
}
