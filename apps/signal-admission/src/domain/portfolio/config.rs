//! Per-user portfolio configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::constants::{
    CORRELATION_THRESHOLD, DEFAULT_RISK_PER_TRADE, HEAT_WARNING_LEVEL, MAX_EXPOSURE_PER_STOCK,
    MAX_PORTFOLIO_HEAT, MAX_PORTFOLIO_HEAT_CEILING, MAX_RISK_PER_TRADE, MAX_SMALL_CAP_EXPOSURE,
    MAX_STOCKS_PER_SECTOR, MIN_CASH_RESERVE,
};
use crate::domain::shared::{DomainError, UserId};

/// Risk configuration owned by a single user.
///
/// Read-only to the admission pipeline; changed only through explicit
/// configuration commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Owning user.
    pub user: UserId,
    /// Total trading capital in rupiah.
    pub total_capital: Decimal,
    /// Fraction of capital risked per trade, in (0, 0.05].
    pub risk_per_trade: Decimal,
    /// Maximum aggregate heat, in [0, 0.5].
    pub max_heat: Decimal,
    /// Heat level at which a non-blocking warning is attached.
    pub heat_warning: Decimal,
    /// Maximum exposure per position as a fraction of capital.
    pub max_exposure_pct: Decimal,
    /// Maximum exposure for small-cap positions.
    pub max_small_cap_exposure_pct: Decimal,
    /// Maximum concurrent positions per sector (at least 1).
    pub max_positions_per_sector: u32,
    /// Target fraction of capital held as cash.
    pub cash_reserve_target: Decimal,
    /// Correlation above which exposure is reduced, in (0, 1].
    pub correlation_threshold: f64,
    /// Whether the circuit breaker stage runs.
    pub circuit_breaker_enabled: bool,
}

impl PortfolioConfig {
    /// Build a configuration with the standard limits for the given capital.
    #[must_use]
    pub fn with_defaults(user: UserId, total_capital: Decimal) -> Self {
        Self {
            user,
            total_capital,
            risk_per_trade: DEFAULT_RISK_PER_TRADE,
            max_heat: MAX_PORTFOLIO_HEAT,
            heat_warning: HEAT_WARNING_LEVEL,
            max_exposure_pct: MAX_EXPOSURE_PER_STOCK,
            max_small_cap_exposure_pct: MAX_SMALL_CAP_EXPOSURE,
            max_positions_per_sector: MAX_STOCKS_PER_SECTOR,
            cash_reserve_target: MIN_CASH_RESERVE,
            correlation_threshold: CORRELATION_THRESHOLD,
            circuit_breaker_enabled: true,
        }
    }

    /// Check the configuration against its documented ranges.
    ///
    /// # Errors
    ///
    /// Returns the first field found outside its range.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.total_capital <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "total_capital",
                "Capital must be greater than zero",
            ));
        }
        if self.risk_per_trade <= Decimal::ZERO || self.risk_per_trade > MAX_RISK_PER_TRADE {
            return Err(DomainError::invalid(
                "risk_per_trade",
                format!("must be in (0, {MAX_RISK_PER_TRADE}]"),
            ));
        }
        if self.max_heat < Decimal::ZERO || self.max_heat > MAX_PORTFOLIO_HEAT_CEILING {
            return Err(DomainError::invalid(
                "max_heat",
                format!("must be in [0, {MAX_PORTFOLIO_HEAT_CEILING}]"),
            ));
        }
        if self.heat_warning < Decimal::ZERO || self.heat_warning > self.max_heat {
            return Err(DomainError::invalid(
                "heat_warning",
                "must be between 0 and max_heat",
            ));
        }
        for (field, value) in [
            ("max_exposure_pct", self.max_exposure_pct),
            ("max_small_cap_exposure_pct", self.max_small_cap_exposure_pct),
        ] {
            if value <= Decimal::ZERO || value > Decimal::ONE {
                return Err(DomainError::invalid(field, "must be in (0, 1]"));
            }
        }
        if self.cash_reserve_target < Decimal::ZERO || self.cash_reserve_target > Decimal::ONE {
            return Err(DomainError::invalid(
                "cash_reserve_target",
                "must be in [0, 1]",
            ));
        }
        if self.max_positions_per_sector == 0 {
            return Err(DomainError::invalid(
                "max_positions_per_sector",
                "must be at least 1",
            ));
        }
        if !(self.correlation_threshold > 0.0 && self.correlation_threshold <= 1.0) {
            return Err(DomainError::invalid(
                "correlation_threshold",
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }
}
