//! Open position snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// A position currently held, as recorded in the trade journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPosition {
    /// Ticker.
    pub symbol: Symbol,
    /// Fraction of capital at risk between entry and stop.
    pub risk_fraction: Decimal,
    /// Remaining shares.
    pub quantity: u64,
    /// Average entry price.
    pub entry_price: Decimal,
}

impl OpenPosition {
    /// Create a new open position snapshot.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        risk_fraction: Decimal,
        quantity: u64,
        entry_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            risk_fraction,
            quantity,
            entry_price,
        }
    }

    /// Capital tied up in this position.
    #[must_use]
    pub fn exposure(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.entry_price)
    }
}
