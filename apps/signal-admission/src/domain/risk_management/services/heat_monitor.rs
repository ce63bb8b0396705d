//! Portfolio heat aggregation.

use rust_decimal::Decimal;

use crate::domain::portfolio::{OpenPosition, PortfolioConfig};
use crate::domain::risk_management::value_objects::{
    HeatLevel, HeatProjection, HeatStatus, PositionHeat,
};

/// Aggregates the risk already committed across open positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatMonitor {
    heat_warning: Decimal,
    cash_reserve_target: Decimal,
}

impl HeatMonitor {
    /// Create a monitor with explicit thresholds.
    #[must_use]
    pub const fn new(heat_warning: Decimal, cash_reserve_target: Decimal) -> Self {
        Self {
            heat_warning,
            cash_reserve_target,
        }
    }

    /// Create a monitor using a portfolio's thresholds.
    #[must_use]
    pub fn for_portfolio(config: &PortfolioConfig) -> Self {
        Self::new(config.heat_warning, config.cash_reserve_target)
    }

    /// Sum committed risk and exposure across `positions`.
    ///
    /// Status is LIMIT at or above `max_heat`, WARNING at or above the warning
    /// threshold, SAFE otherwise. The cash reserve flag never blocks.
    #[must_use]
    pub fn compute_heat(
        &self,
        positions: &[OpenPosition],
        total_capital: Decimal,
        max_heat: Decimal,
    ) -> HeatStatus {
        let breakdown: Vec<PositionHeat> = positions
            .iter()
            .map(|p| PositionHeat {
                symbol: p.symbol.clone(),
                risk: p.risk_fraction,
                exposure: p.exposure(),
            })
            .collect();

        let current_heat = breakdown
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.risk));
        let total_exposure = breakdown
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.exposure));

        let status = if current_heat >= max_heat {
            HeatLevel::Limit
        } else if current_heat >= self.heat_warning {
            HeatLevel::Warning
        } else {
            HeatLevel::Safe
        };

        let cash_reserve_pct = if total_capital > Decimal::ZERO {
            total_capital
                .saturating_sub(total_exposure)
                .checked_div(total_capital)
                .unwrap_or(Decimal::MIN)
        } else {
            Decimal::ZERO
        };

        HeatStatus {
            current_heat,
            max_heat,
            available_heat: max_heat.saturating_sub(current_heat).max(Decimal::ZERO),
            status,
            total_exposure,
            cash_reserve_pct,
            cash_reserve_ok: cash_reserve_pct >= self.cash_reserve_target,
            positions: breakdown,
        }
    }

    /// Heat after adding `candidate_risk`.
    #[must_use]
    pub fn project_heat(
        current_heat: Decimal,
        candidate_risk: Decimal,
        max_heat: Decimal,
    ) -> HeatProjection {
        let projected_heat = current_heat.saturating_add(candidate_risk);
        HeatProjection {
            projected_heat,
            would_exceed: projected_heat > max_heat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn monitor() -> HeatMonitor {
        HeatMonitor::new(dec!(0.06), dec!(0.30))
    }

    fn position(symbol: &str, risk: Decimal, qty: u64, entry: Decimal) -> OpenPosition {
        OpenPosition::new(symbol, risk, qty, entry)
    }

    #[test]
    fn empty_portfolio_is_safe() {
        let status = monitor().compute_heat(&[], dec!(100_000_000), dec!(0.08));
        assert_eq!(status.current_heat, Decimal::ZERO);
        assert_eq!(status.available_heat, dec!(0.08));
        assert_eq!(status.status, HeatLevel::Safe);
        assert_eq!(status.cash_reserve_pct, Decimal::ONE);
        assert!(status.cash_reserve_ok);
    }

    #[test_case(dec!(0.03), HeatLevel::Safe ; "below warning")]
    #[test_case(dec!(0.06), HeatLevel::Warning ; "at warning")]
    #[test_case(dec!(0.07), HeatLevel::Warning ; "between warning and limit")]
    #[test_case(dec!(0.08), HeatLevel::Limit ; "at limit")]
    #[test_case(dec!(0.10), HeatLevel::Limit ; "above limit")]
    fn status_thresholds(heat: Decimal, expected: HeatLevel) {
        let positions = [position("BBCA", heat, 100, dec!(1_000))];
        let status = monitor().compute_heat(&positions, dec!(100_000_000), dec!(0.08));
        assert_eq!(status.status, expected);
    }

    #[test]
    fn sums_risk_and_exposure() {
        let positions = [
            position("BBCA", dec!(0.01), 1_000, dec!(9_000)),
            position("TLKM", dec!(0.015), 10_000, dec!(3_000)),
        ];
        let status = monitor().compute_heat(&positions, dec!(100_000_000), dec!(0.08));
        assert_eq!(status.current_heat, dec!(0.025));
        assert_eq!(status.total_exposure, dec!(39_000_000));
        assert_eq!(status.cash_reserve_pct, dec!(0.61));
        assert_eq!(status.positions.len(), 2);
        assert_eq!(status.available_heat, dec!(0.055));
    }

    #[test]
    fn low_cash_reserve_flagged() {
        let positions = [position("BBCA", dec!(0.01), 8_000, dec!(10_000))];
        let status = monitor().compute_heat(&positions, dec!(100_000_000), dec!(0.08));
        assert_eq!(status.cash_reserve_pct, dec!(0.2));
        assert!(!status.cash_reserve_ok);
    }

    #[test]
    fn available_heat_never_negative() {
        let positions = [position("BBCA", dec!(0.09), 100, dec!(1_000))];
        let status = monitor().compute_heat(&positions, dec!(100_000_000), dec!(0.08));
        assert_eq!(status.available_heat, Decimal::ZERO);
    }

    #[test]
    fn projection_exceeds_strictly() {
        let at_limit = HeatMonitor::project_heat(dec!(0.07), dec!(0.01), dec!(0.08));
        assert_eq!(at_limit.projected_heat, dec!(0.08));
        assert!(!at_limit.would_exceed);

        let over = HeatMonitor::project_heat(dec!(0.075), dec!(0.01), dec!(0.08));
        assert_eq!(over.projected_heat, dec!(0.085));
        assert!(over.would_exceed);
    }
}
