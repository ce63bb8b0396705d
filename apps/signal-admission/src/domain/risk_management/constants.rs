//! Default thresholds for the admission rules.
//!
//! Fractions are of total capital unless noted otherwise.

use rust_decimal::Decimal;

/// Hard ceiling on risk per trade (5%).
pub const MAX_RISK_PER_TRADE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Default risk per trade (1%).
pub const DEFAULT_RISK_PER_TRADE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default maximum portfolio heat (8%).
pub const MAX_PORTFOLIO_HEAT: Decimal = Decimal::from_parts(8, 0, 0, false, 2);
/// Upper bound any configured heat limit may take (50%).
pub const MAX_PORTFOLIO_HEAT_CEILING: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Default heat warning level (6%).
pub const HEAT_WARNING_LEVEL: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Default per-position exposure cap (25%).
pub const MAX_EXPOSURE_PER_STOCK: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
/// Default small-cap exposure cap (15%).
pub const MAX_SMALL_CAP_EXPOSURE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Default cash reserve target (30%).
pub const MIN_CASH_RESERVE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Default maximum open positions per sector.
pub const MAX_STOCKS_PER_SECTOR: u32 = 2;
/// Sector assigned to symbols without a classification.
pub const UNCLASSIFIED_SECTOR: &str = "Other";

/// Correlation above which exposure is reduced.
pub const CORRELATION_THRESHOLD: f64 = 0.7;
/// Trading days of aligned returns required for a correlation estimate.
pub const CORRELATION_LOOKBACK_DAYS: usize = 90;
/// Multiplier applied to the exposure cap when correlation is high.
pub const CORRELATION_CAP_FACTOR: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Exchange lot (shares per lot).
pub const LOT_SIZE: u64 = 100;
/// Stop distance above which a wide-stop warning is attached (15%).
pub const WIDE_STOP_THRESHOLD: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Monthly drawdown that suspends trading (10%).
pub const CB_DRAWDOWN_TRIGGER: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Consecutive losing trades that suspend trading.
pub const CB_CONSECUTIVE_LOSS_TRIGGER: u32 = 5;
/// Suspension length after a drawdown trigger.
pub const CB_DRAWDOWN_SUSPEND_DAYS: i64 = 7;
/// Suspension length after a loss-streak trigger.
pub const CB_LOSS_SUSPEND_DAYS: i64 = 3;
/// Risk per trade once trading resumes after a trigger (0.25%).
pub const CB_REDUCED_RISK: Decimal = Decimal::from_parts(25, 0, 0, false, 4);
