//! Human-readable warning and rejection messages.
//!
//! Every rejection reason and warning the validator emits is built here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Format a fraction as a percentage with one decimal place.
pub fn pct(fraction: Decimal) -> String {
    format!("{:.1}%", fraction.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Format a fraction as a percentage with two decimal places.
pub fn pct2(fraction: Decimal) -> String {
    format!("{:.2}%", fraction.saturating_mul(Decimal::ONE_HUNDRED))
}

pub(crate) fn heat_limit_reached(current: Decimal) -> String {
    format!(
        "Portfolio heat limit ({}) reached. Close positions first.",
        pct(current)
    )
}

pub(crate) fn heat_projection_exceeded(projected: Decimal, max: Decimal) -> String {
    format!(
        "Heat limit reached ({} > {}). Signal blocked.",
        pct(projected),
        pct(max)
    )
}

pub(crate) fn heat_high(current: Decimal, max: Decimal) -> String {
    format!("Portfolio heat {} is high (limit {})", pct(current), pct(max))
}

pub(crate) fn cash_reserve_low(reserve: Decimal, target: Decimal) -> String {
    format!(
        "Cash reserve {} below target {}",
        pct(reserve),
        pct(target)
    )
}

pub(crate) fn sector_limit(count: u32, sector: &str) -> String {
    format!("Sector limit: already {count} {sector} stocks open.")
}

pub(crate) fn stop_too_wide(distance: Decimal, threshold: Decimal) -> String {
    format!(
        "Stop unusually wide ({} > {}).",
        pct(distance),
        pct(threshold)
    )
}

pub(crate) fn exposure_capped(exposure: Decimal, cap: Decimal, cap_name: &str) -> String {
    format!(
        "Exposure capped at {} by {cap_name} cap ({}).",
        pct(exposure),
        pct(cap)
    )
}

pub(crate) fn correlation_capped(correlation: f64, cap: Decimal) -> String {
    format!(
        "High correlation ({correlation:.2}). Max exposure reduced to {}.",
        pct(cap)
    )
}

pub(crate) fn below_one_lot(lot_size: u64) -> String {
    format!("Position size below one lot ({lot_size} shares). Signal blocked.")
}

pub(crate) fn breaker_triggered(trigger: &str, until: DateTime<Utc>) -> String {
    format!(
        "CIRCUIT BREAKER ACTIVATED: {trigger}. Suspended until {}.",
        until.format("%Y-%m-%d")
    )
}

pub(crate) fn breaker_suspended(until: DateTime<Utc>) -> String {
    format!(
        "Trading suspended until {}.",
        until.format("%Y-%m-%d %H:%M UTC")
    )
}

pub(crate) fn risk_reduced(risk: Decimal) -> String {
    format!(
        "Risk reduced to {} due to recent drawdown/losses.",
        pct2(risk)
    )
}

pub(crate) fn config_missing(user: &str) -> String {
    format!("No portfolio configuration for {user}. Set capital and risk limits before trading.")
}

pub(crate) fn config_invalid(detail: &str) -> String {
    format!("Portfolio configuration invalid: {detail}")
}

pub(crate) const fn data_unavailable() -> &'static str {
    "Risk data unavailable. Signal held until it can be validated."
}

pub(crate) fn data_unavailable_detail(detail: &str) -> String {
    format!("Risk check degraded: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pct_formats_one_decimal() {
        assert_eq!(pct(dec!(0.085)), "8.5%");
        assert_eq!(pct(dec!(0.25)), "25.0%");
    }

    #[test]
    fn pct2_formats_two_decimals() {
        assert_eq!(pct2(dec!(0.0025)), "0.25%");
    }

    #[test]
    fn sector_message_names_sector() {
        let msg = sector_limit(2, "Banking");
        assert!(msg.contains("2 Banking"));
    }
}
