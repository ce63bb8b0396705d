//! Candidate signal under evaluation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// A long-biased entry proposed by the upstream strategy layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSignal {
    /// Ticker.
    pub symbol: Symbol,
    /// Proposed entry price.
    pub entry_price: Decimal,
    /// Protective stop; must be positive and below entry.
    pub stop_price: Decimal,
}

impl CandidateSignal {
    /// Create a candidate signal.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, entry_price: Decimal, stop_price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            entry_price,
            stop_price,
        }
    }

    /// Distance between entry and stop.
    #[must_use]
    pub fn stop_distance(&self) -> Decimal {
        self.entry_price - self.stop_price
    }
}
