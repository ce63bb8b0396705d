//! Closed trade history entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// A trade that has been fully exited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// Ticker.
    pub symbol: Symbol,
    /// Realized profit or loss in rupiah.
    pub pnl: Decimal,
    /// Time of the final exit.
    pub exit_time: DateTime<Utc>,
}

impl ClosedTrade {
    /// Create a closed trade record.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, pnl: Decimal, exit_time: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            pnl,
            exit_time,
        }
    }

    /// Whether the trade lost money.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}
