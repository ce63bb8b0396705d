//! Circuit breaker check result.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::circuit_breaker_event::{CircuitBreakerEvent, TriggerType};
use crate::domain::shared::EventId;

/// Breaker state as seen by one validation call.
///
/// A stored suspension and a trigger that fired during this call are kept
/// apart so the validator can treat them differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BreakerState {
    /// No restriction.
    Inactive,
    /// A persisted suspension is still running.
    AlreadySuspended {
        /// The stored record.
        event: CircuitBreakerEvent,
    },
    /// A trigger fired during this call; the caller persists the event.
    NewlyTriggered {
        /// Freshly computed suspension.
        event: CircuitBreakerEvent,
    },
}

/// Output of [`CircuitBreaker::check`](crate::domain::risk_management::CircuitBreaker::check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerStatus {
    /// Current state.
    pub state: BreakerState,
    /// A stored suspension found to be expired; the caller resolves it.
    pub expired: Option<EventId>,
    /// Human-readable summary.
    pub message: String,
}

impl CircuitBreakerStatus {
    /// Inactive status.
    #[must_use]
    pub fn inactive(expired: Option<EventId>) -> Self {
        Self {
            state: BreakerState::Inactive,
            expired,
            message: "Circuit breaker inactive".to_string(),
        }
    }

    fn event(&self) -> Option<&CircuitBreakerEvent> {
        match &self.state {
            BreakerState::Inactive => None,
            BreakerState::AlreadySuspended { event } | BreakerState::NewlyTriggered { event } => {
                Some(event)
            }
        }
    }

    /// Whether a suspension applies.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, BreakerState::Inactive)
    }

    /// Trigger of the applicable suspension.
    #[must_use]
    pub fn trigger_type(&self) -> Option<TriggerType> {
        self.event().map(|e| e.trigger)
    }

    /// Trigger value of the applicable suspension.
    #[must_use]
    pub fn trigger_value(&self) -> Option<Decimal> {
        self.event().map(|e| e.trigger_value)
    }

    /// End of the applicable suspension.
    #[must_use]
    pub fn suspended_until(&self) -> Option<DateTime<Utc>> {
        self.event().map(|e| e.suspended_until)
    }

    /// Reduced risk per trade carried by the suspension.
    #[must_use]
    pub fn risk_override(&self) -> Option<Decimal> {
        self.event().map(|e| e.risk_override)
    }
}
