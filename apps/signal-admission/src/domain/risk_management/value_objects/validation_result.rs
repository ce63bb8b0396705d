//! Admission decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::circuit_breaker_event::CircuitBreakerEvent;
use super::exposure_cap::AppliedCap;
use crate::domain::shared::EventId;

/// Verdict that replaces the strategy's verdict when a signal is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Blocked for now; may pass once conditions change.
    Wait,
    /// Trading is suspended by the circuit breaker.
    Suspended,
}

impl Verdict {
    /// Label used for metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wait => "WAIT",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Circuit breaker state change the caller must persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakerTransition {
    /// A stored suspension expired and should be resolved.
    Expired {
        /// Stored event.
        event_id: EventId,
    },
    /// A new suspension should be stored.
    Triggered {
        /// Event to store.
        event: CircuitBreakerEvent,
    },
}

/// Outcome of one validation call.
///
/// Sizing fields are set only when `passed` is true; `block_reason` is set
/// only when it is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskValidationResult {
    /// Whether the signal may be entered.
    pub passed: bool,
    /// Verdict override when blocked.
    pub verdict: Option<Verdict>,
    /// Whole lots to buy.
    pub lot_size: Option<u64>,
    /// Shares to buy (lots × lot size).
    pub shares: Option<u64>,
    /// Exposure as a fraction of capital.
    pub exposure_pct: Option<Decimal>,
    /// Cap the exposure was checked against.
    pub applied_cap: Option<AppliedCap>,
    /// Risk actually taken at the approved size.
    pub risk_taken: Option<Decimal>,
    /// Heat before this trade.
    pub heat_before: Decimal,
    /// Heat after this trade (or the rejected projection).
    pub heat_after: Decimal,
    /// Non-blocking warnings, in stage order.
    pub warnings: Vec<String>,
    /// Why the signal was blocked.
    pub block_reason: Option<String>,
    /// Breaker changes to persist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaker_transitions: Vec<BreakerTransition>,
}

/// Sizing figures carried by an approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovedSize {
    /// Whole lots.
    pub lots: u64,
    /// Shares.
    pub shares: u64,
    /// Exposure fraction.
    pub exposure_pct: Decimal,
    /// Effective cap.
    pub applied_cap: AppliedCap,
    /// Actual risk fraction.
    pub risk_taken: Decimal,
}

impl RiskValidationResult {
    /// An approval.
    #[must_use]
    pub fn approved(
        size: ApprovedSize,
        heat_before: Decimal,
        heat_after: Decimal,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            passed: true,
            verdict: None,
            lot_size: Some(size.lots),
            shares: Some(size.shares),
            exposure_pct: Some(size.exposure_pct),
            applied_cap: Some(size.applied_cap),
            risk_taken: Some(size.risk_taken),
            heat_before,
            heat_after,
            warnings,
            block_reason: None,
            breaker_transitions: Vec::new(),
        }
    }

    /// A rejection with no heat information.
    #[must_use]
    pub fn rejected(verdict: Verdict, reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            verdict: Some(verdict),
            lot_size: None,
            shares: None,
            exposure_pct: None,
            applied_cap: None,
            risk_taken: None,
            heat_before: Decimal::ZERO,
            heat_after: Decimal::ZERO,
            warnings: Vec::new(),
            block_reason: Some(reason.into()),
            breaker_transitions: Vec::new(),
        }
    }

    /// Attach heat figures.
    #[must_use]
    pub const fn with_heat(mut self, before: Decimal, after: Decimal) -> Self {
        self.heat_before = before;
        self.heat_after = after;
        self
    }

    /// Attach warnings collected so far.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Attach breaker transitions.
    #[must_use]
    pub fn with_transitions(mut self, transitions: Vec<BreakerTransition>) -> Self {
        self.breaker_transitions = transitions;
        self
    }
}
