//! Trading suspension after adverse performance.
//!
//! # State Machine
//!
//! ```text
//! ACTIVE → SUSPENDED (monthly drawdown >= trigger, or loss streak >= trigger)
//! SUSPENDED → ACTIVE (clock passes suspended_until; checked lazily)
//! ```
//!
//! The breaker holds no state of its own. The suspension record comes from
//! and goes back to an injected store, so every call is a function of its
//! inputs.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::portfolio::ClosedTrade;
use crate::domain::risk_management::constants::{
    CB_CONSECUTIVE_LOSS_TRIGGER, CB_DRAWDOWN_SUSPEND_DAYS, CB_DRAWDOWN_TRIGGER,
    CB_LOSS_SUSPEND_DAYS, CB_REDUCED_RISK,
};
use crate::domain::risk_management::messages;
use crate::domain::risk_management::value_objects::{
    BreakerState, CircuitBreakerEvent, CircuitBreakerStatus, TriggerType,
};
use crate::domain::shared::{EventId, UserId};

/// Suspends new entries after a monthly drawdown or a losing streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreaker {
    drawdown_trigger: Decimal,
    consecutive_loss_trigger: u32,
    drawdown_suspension: Duration,
    loss_suspension: Duration,
    reduced_risk: Decimal,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(
            CB_DRAWDOWN_TRIGGER,
            CB_CONSECUTIVE_LOSS_TRIGGER,
            Duration::days(CB_DRAWDOWN_SUSPEND_DAYS),
            Duration::days(CB_LOSS_SUSPEND_DAYS),
            CB_REDUCED_RISK,
        )
    }
}

impl CircuitBreaker {
    /// Create a breaker with explicit triggers.
    #[must_use]
    pub const fn new(
        drawdown_trigger: Decimal,
        consecutive_loss_trigger: u32,
        drawdown_suspension: Duration,
        loss_suspension: Duration,
        reduced_risk: Decimal,
    ) -> Self {
        Self {
            drawdown_trigger,
            consecutive_loss_trigger,
            drawdown_suspension,
            loss_suspension,
            reduced_risk,
        }
    }

    /// Risk per trade carried by new suspensions.
    #[must_use]
    pub const fn reduced_risk(&self) -> Decimal {
        self.reduced_risk
    }

    /// Realized loss this UTC calendar month over estimated month-start capital.
    ///
    /// Month-start capital is `current_capital - realized_pnl`. Zero when the
    /// month is net positive or the estimate is not positive.
    #[must_use]
    pub fn monthly_drawdown<'a, I>(
        trades: I,
        current_capital: Decimal,
        now: DateTime<Utc>,
    ) -> Decimal
    where
        I: IntoIterator<Item = &'a ClosedTrade>,
    {
        let month_start = start_of_month(now);
        let realized = trades
            .into_iter()
            .filter(|t| t.exit_time >= month_start)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.pnl));

        let start_capital = current_capital.saturating_sub(realized);
        if start_capital <= Decimal::ZERO || realized >= Decimal::ZERO {
            return Decimal::ZERO;
        }
        realized
            .abs()
            .checked_div(start_capital)
            .unwrap_or(Decimal::MAX)
    }

    /// Losing trades counted back from the most recent exit until the first
    /// non-loss.
    #[must_use]
    pub fn consecutive_losses<'a, I>(trades: I) -> u32
    where
        I: IntoIterator<Item = &'a ClosedTrade>,
    {
        let mut sorted: Vec<&ClosedTrade> = trades.into_iter().collect();
        sorted.sort_by(|a, b| b.exit_time.cmp(&a.exit_time));
        let streak = sorted.iter().take_while(|t| t.is_loss()).count();
        u32::try_from(streak).unwrap_or(u32::MAX)
    }

    /// Evaluate the breaker.
    ///
    /// An unresolved, unexpired `active` record is reported as
    /// `AlreadySuspended`. An expired one is reported in `expired` for the
    /// caller to resolve, and only trades that closed after it started are
    /// considered for new triggers. `resume_after` applies the same cutoff
    /// for a suspension resolved earlier.
    #[must_use]
    pub fn check(
        &self,
        user: &UserId,
        trades: &[ClosedTrade],
        current_capital: Decimal,
        active: Option<&CircuitBreakerEvent>,
        resume_after: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> CircuitBreakerStatus {
        let mut expired = None;
        let mut cutoff = resume_after;

        if let Some(event) = active.filter(|e| !e.resolved) {
            if !event.is_expired(now) {
                return CircuitBreakerStatus {
                    message: messages::breaker_suspended(event.suspended_until),
                    state: BreakerState::AlreadySuspended {
                        event: event.clone(),
                    },
                    expired: None,
                };
            }
            expired = Some(event.id.clone());
            cutoff = cutoff.max(Some(event.suspended_from));
        }

        let counted: Vec<&ClosedTrade> = trades
            .iter()
            .filter(|t| cutoff.is_none_or(|c| t.exit_time > c))
            .collect();

        let drawdown = Self::monthly_drawdown(counted.iter().copied(), current_capital, now);
        if drawdown >= self.drawdown_trigger {
            let event = CircuitBreakerEvent::open(
                user.clone(),
                TriggerType::Drawdown,
                drawdown,
                now,
                self.drawdown_suspension,
                self.reduced_risk,
            );
            let label = format!("Monthly drawdown {}", messages::pct(drawdown));
            return Self::triggered(event, &label, expired);
        }

        let losses = Self::consecutive_losses(counted.iter().copied());
        if losses >= self.consecutive_loss_trigger {
            let event = CircuitBreakerEvent::open(
                user.clone(),
                TriggerType::ConsecutiveLoss,
                Decimal::from(losses),
                now,
                self.loss_suspension,
                self.reduced_risk,
            );
            let label = format!("{losses} consecutive losses");
            return Self::triggered(event, &label, expired);
        }

        CircuitBreakerStatus::inactive(expired)
    }

    fn triggered(
        event: CircuitBreakerEvent,
        label: &str,
        expired: Option<EventId>,
    ) -> CircuitBreakerStatus {
        CircuitBreakerStatus {
            message: messages::breaker_triggered(label, event.suspended_until),
            state: BreakerState::NewlyTriggered { event },
            expired,
        }
    }
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
