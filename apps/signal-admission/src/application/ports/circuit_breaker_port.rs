//! Circuit Breaker Port (Driven Port)
//!
//! Persistence for suspension records. The breaker itself is stateless.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::risk_management::CircuitBreakerEvent;
use crate::domain::shared::{EventId, UserId};

/// Port for suspension records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CircuitBreakerStore: Send + Sync {
    /// Most recent unresolved suspension for `user`.
    async fn get_active(&self, user: &UserId)
    -> Result<Option<CircuitBreakerEvent>, RepositoryError>;

    /// Most recent resolved suspension for `user`.
    async fn latest_resolved(
        &self,
        user: &UserId,
    ) -> Result<Option<CircuitBreakerEvent>, RepositoryError>;

    /// Store a new suspension.
    async fn persist(&self, event: &CircuitBreakerEvent) -> Result<(), RepositoryError>;

    /// Mark a suspension resolved.
    async fn resolve(&self, id: &EventId, at: DateTime<Utc>) -> Result<(), RepositoryError>;
}
