//! Default per-user risk limits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::domain::portfolio::PortfolioConfig;
use crate::domain::risk_management::constants::{
    CORRELATION_THRESHOLD, DEFAULT_RISK_PER_TRADE, HEAT_WARNING_LEVEL, MAX_EXPOSURE_PER_STOCK,
    MAX_PORTFOLIO_HEAT, MAX_SMALL_CAP_EXPOSURE, MAX_STOCKS_PER_SECTOR, MIN_CASH_RESERVE,
};
use crate::domain::shared::UserId;

/// Limits applied when seeding a new user's portfolio configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Risk per trade as a fraction of capital.
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: Decimal,
    /// Maximum portfolio heat.
    #[serde(default = "default_max_heat")]
    pub max_heat: Decimal,
    /// Heat at which a warning is attached.
    #[serde(default = "default_heat_warning")]
    pub heat_warning: Decimal,
    /// Maximum exposure per position.
    #[serde(default = "default_max_exposure")]
    pub max_exposure_pct: Decimal,
    /// Maximum exposure for small-cap positions.
    #[serde(default = "default_max_small_cap_exposure")]
    pub max_small_cap_exposure_pct: Decimal,
    /// Open positions allowed per sector.
    #[serde(default = "default_max_per_sector")]
    pub max_positions_per_sector: u32,
    /// Cash reserve target.
    #[serde(default = "default_cash_reserve")]
    pub cash_reserve_target: Decimal,
    /// Benchmark correlation threshold.
    #[serde(default = "default_correlation_threshold")]
    pub correlation_threshold: f64,
    /// Whether the circuit breaker runs.
    #[serde(default = "default_true")]
    pub circuit_breaker_enabled: bool,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_per_trade: default_risk_per_trade(),
            max_heat: default_max_heat(),
            heat_warning: default_heat_warning(),
            max_exposure_pct: default_max_exposure(),
            max_small_cap_exposure_pct: default_max_small_cap_exposure(),
            max_positions_per_sector: default_max_per_sector(),
            cash_reserve_target: default_cash_reserve(),
            correlation_threshold: default_correlation_threshold(),
            circuit_breaker_enabled: true,
        }
    }
}

impl RiskConfig {
    /// Portfolio configuration for `user` using these limits.
    #[must_use]
    pub fn portfolio_for(&self, user: UserId, total_capital: Decimal) -> PortfolioConfig {
        PortfolioConfig {
            user,
            total_capital,
            risk_per_trade: self.risk_per_trade,
            max_heat: self.max_heat,
            heat_warning: self.heat_warning,
            max_exposure_pct: self.max_exposure_pct,
            max_small_cap_exposure_pct: self.max_small_cap_exposure_pct,
            max_positions_per_sector: self.max_positions_per_sector,
            cash_reserve_target: self.cash_reserve_target,
            correlation_threshold: self.correlation_threshold,
            circuit_breaker_enabled: self.circuit_breaker_enabled,
        }
    }
}

const fn default_risk_per_trade() -> Decimal {
    DEFAULT_RISK_PER_TRADE
}

const fn default_max_heat() -> Decimal {
    MAX_PORTFOLIO_HEAT
}

const fn default_heat_warning() -> Decimal {
    HEAT_WARNING_LEVEL
}

const fn default_max_exposure() -> Decimal {
    MAX_EXPOSURE_PER_STOCK
}

const fn default_max_small_cap_exposure() -> Decimal {
    MAX_SMALL_CAP_EXPOSURE
}

const fn default_max_per_sector() -> u32 {
    MAX_STOCKS_PER_SECTOR
}

const fn default_cash_reserve() -> Decimal {
    MIN_CASH_RESERVE
}

const fn default_correlation_threshold() -> f64 {
    CORRELATION_THRESHOLD
}
