//! Circuit breaker suspension record.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{EventId, UserId};

/// Condition that suspended trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Monthly realized drawdown reached the trigger.
    Drawdown,
    /// Losing streak reached the trigger.
    ConsecutiveLoss,
}

impl TriggerType {
    /// Label used for metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drawdown => "drawdown",
            Self::ConsecutiveLoss => "consecutive_loss",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suspension of new entries for one user.
///
/// Created when a trigger fires, persisted by the caller, and resolved lazily
/// once the clock passes `suspended_until`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerEvent {
    /// Event identifier.
    pub id: EventId,
    /// Suspended user.
    pub user: UserId,
    /// Trigger that fired.
    pub trigger: TriggerType,
    /// Drawdown fraction or loss count at trigger time.
    pub trigger_value: Decimal,
    /// Start of suspension.
    pub suspended_from: DateTime<Utc>,
    /// End of suspension.
    pub suspended_until: DateTime<Utc>,
    /// Risk per trade to use once trading resumes.
    pub risk_override: Decimal,
    /// Whether the suspension has been closed.
    pub resolved: bool,
    /// When it was closed.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl CircuitBreakerEvent {
    /// Open a new suspension starting at `now`.
    ///
    /// The id is derived from the user, trigger and start time so that
    /// re-evaluating identical inputs yields an identical event.
    #[must_use]
    pub fn open(
        user: UserId,
        trigger: TriggerType,
        trigger_value: Decimal,
        now: DateTime<Utc>,
        suspend_for: Duration,
        risk_override: Decimal,
    ) -> Self {
        let id = EventId::new(format!(
            "cb-{user}-{trigger}-{}",
            now.timestamp_millis()
        ));
        Self {
            id,
            user,
            trigger,
            trigger_value,
            suspended_from: now,
            suspended_until: now + suspend_for,
            risk_override,
            resolved: false,
            resolved_at: None,
        }
    }

    /// Whether the suspension window has passed.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.suspended_until
    }

    /// Whether the suspension still blocks entries at `now`.
    #[must_use]
    pub fn is_blocking(&self, now: DateTime<Utc>) -> bool {
        !self.resolved && !self.is_expired(now)
    }

    /// Mark the suspension closed.
    pub fn resolve(&mut self, at: DateTime<Utc>) {
        self.resolved = true;
        self.resolved_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn event(now: DateTime<Utc>) -> CircuitBreakerEvent {
        CircuitBreakerEvent::open(
            UserId::new("u1"),
            TriggerType::ConsecutiveLoss,
            dec!(5),
            now,
            Duration::days(3),
            dec!(0.0025),
        )
    }

    #[test]
    fn open_sets_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let event = event(now);
        assert_eq!(event.suspended_from, now);
        assert_eq!(event.suspended_until, now + Duration::days(3));
        assert!(!event.resolved);
    }

    #[test]
    fn expiry_is_strictly_after_until() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let event = event(now);
        assert!(event.is_blocking(now + Duration::days(3)));
        assert!(event.is_expired(now + Duration::days(3) + Duration::seconds(1)));
    }

    #[test]
    fn id_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(event(now).id, event(now).id);
        assert!(event(now).id.as_str().starts_with("cb-u1-consecutive_loss-"));
    }

    #[test]
    fn resolve_stops_blocking() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let mut event = event(now);
        event.resolve(now);
        assert!(!event.is_blocking(now));
        assert_eq!(event.resolved_at, Some(now));
    }
}
