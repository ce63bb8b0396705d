//! Trading circuit breaker configuration.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::constants::{
    CB_CONSECUTIVE_LOSS_TRIGGER, CB_DRAWDOWN_SUSPEND_DAYS, CB_DRAWDOWN_TRIGGER,
    CB_LOSS_SUSPEND_DAYS, CB_REDUCED_RISK,
};
use crate::domain::risk_management::{CircuitBreaker, NewTriggerPolicy};

/// Breaker triggers and suspension lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Monthly drawdown that suspends trading.
    #[serde(default = "default_drawdown_trigger")]
    pub drawdown_trigger: Decimal,
    /// Losing streak that suspends trading.
    #[serde(default = "default_loss_streak")]
    pub consecutive_loss_trigger: u32,
    /// Suspension after a drawdown trigger (days).
    #[serde(default = "default_drawdown_days")]
    pub drawdown_suspend_days: i64,
    /// Suspension after a losing streak (days).
    #[serde(default = "default_loss_days")]
    pub loss_suspend_days: i64,
    /// Risk per trade carried by a suspension.
    #[serde(default = "default_reduced_risk")]
    pub reduced_risk: Decimal,
    /// Handling of a trigger that fires during an admission.
    #[serde(default)]
    pub on_new_trigger: NewTriggerPolicy,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            drawdown_trigger: default_drawdown_trigger(),
            consecutive_loss_trigger: default_loss_streak(),
            drawdown_suspend_days: default_drawdown_days(),
            loss_suspend_days: default_loss_days(),
            reduced_risk: default_reduced_risk(),
            on_new_trigger: NewTriggerPolicy::default(),
        }
    }
}

impl CircuitBreakerConfig {
    /// Build the domain breaker.
    #[must_use]
    pub fn breaker(&self) -> CircuitBreaker {
        CircuitBreaker::new(
            self.drawdown_trigger,
            self.consecutive_loss_trigger,
            Duration::days(self.drawdown_suspend_days),
            Duration::days(self.loss_suspend_days),
            self.reduced_risk,
        )
    }
}

const fn default_drawdown_trigger() -> Decimal {
    CB_DRAWDOWN_TRIGGER
}

const fn default_loss_streak() -> u32 {
    CB_CONSECUTIVE_LOSS_TRIGGER
}

const fn default_drawdown_days() -> i64 {
    CB_DRAWDOWN_SUSPEND_DAYS
}

const fn default_loss_days() -> i64 {
    CB_LOSS_SUSPEND_DAYS
}

const fn default_reduced_risk() -> Decimal {
    CB_REDUCED_RISK
}
