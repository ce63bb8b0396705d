//! In-memory portfolio store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{
    CircuitBreakerStore, ClosedTradeHistory, OpenPositionStore, PortfolioConfigStore,
    RepositoryError,
};
use crate::domain::portfolio::{ClosedTrade, OpenPosition, PortfolioConfig};
use crate::domain::risk_management::CircuitBreakerEvent;
use crate::domain::shared::{EventId, UserId};

/// In-memory implementation of the portfolio-side stores.
///
/// Holds configuration, open positions, closed trades and suspension records
/// per user. Suitable for testing and the scenario runner.
#[derive(Debug, Default)]
pub struct InMemoryPortfolioStore {
    configs: RwLock<HashMap<UserId, PortfolioConfig>>,
    positions: RwLock<HashMap<UserId, Vec<OpenPosition>>>,
    trades: RwLock<HashMap<UserId, Vec<ClosedTrade>>>,
    breaker_events: RwLock<HashMap<UserId, Vec<CircuitBreakerEvent>>>,
}

impl InMemoryPortfolioStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a user's configuration.
    pub fn put_config(&self, config: PortfolioConfig) {
        self.configs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(config.user.clone(), config);
    }

    /// Replace a user's open positions.
    pub fn put_positions(&self, user: &UserId, positions: Vec<OpenPosition>) {
        self.positions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.clone(), positions);
    }

    /// Append a closed trade.
    pub fn add_trade(&self, user: &UserId, trade: ClosedTrade) {
        self.trades
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user.clone())
            .or_default()
            .push(trade);
    }

    /// Store a suspension record as-is.
    pub fn put_breaker_event(&self, event: CircuitBreakerEvent) {
        self.breaker_events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.user.clone())
            .or_default()
            .push(event);
    }

    /// Snapshot of a user's open positions.
    #[must_use]
    pub fn positions(&self, user: &UserId) -> Vec<OpenPosition> {
        self.positions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .cloned()
            .unwrap_or_default()
    }

    /// All suspension records for a user, oldest first.
    #[must_use]
    pub fn breaker_events(&self, user: &UserId) -> Vec<CircuitBreakerEvent> {
        self.breaker_events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PortfolioConfigStore for InMemoryPortfolioStore {
    async fn get(&self, user: &UserId) -> Result<Option<PortfolioConfig>, RepositoryError> {
        let configs = self.configs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(configs.get(user).cloned())
    }
}

#[async_trait]
impl OpenPositionStore for InMemoryPortfolioStore {
    async fn list_open(&self, user: &UserId) -> Result<Vec<OpenPosition>, RepositoryError> {
        Ok(self.positions(user))
    }

    async fn open_position(
        &self,
        user: &UserId,
        position: OpenPosition,
    ) -> Result<(), RepositoryError> {
        self.positions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user.clone())
            .or_default()
            .push(position);
        Ok(())
    }
}

#[async_trait]
impl ClosedTradeHistory for InMemoryPortfolioStore {
    async fn list(&self, user: &UserId) -> Result<Vec<ClosedTrade>, RepositoryError> {
        let trades = self.trades.read().unwrap_or_else(PoisonError::into_inner);
        Ok(trades.get(user).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CircuitBreakerStore for InMemoryPortfolioStore {
    async fn get_active(
        &self,
        user: &UserId,
    ) -> Result<Option<CircuitBreakerEvent>, RepositoryError> {
        let events = self
            .breaker_events
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(events
            .get(user)
            .and_then(|list| list.iter().rev().find(|e| !e.resolved))
            .cloned())
    }

    async fn latest_resolved(
        &self,
        user: &UserId,
    ) -> Result<Option<CircuitBreakerEvent>, RepositoryError> {
        let events = self
            .breaker_events
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(events
            .get(user)
            .and_then(|list| list.iter().rev().find(|e| e.resolved))
            .cloned())
    }

    async fn persist(&self, event: &CircuitBreakerEvent) -> Result<(), RepositoryError> {
        let mut events = self
            .breaker_events
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let list = events.entry(event.user.clone()).or_default();
        match list.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => list.push(event.clone()),
        }
        drop(events);
        Ok(())
    }

    async fn resolve(&self, id: &EventId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut events = self
            .breaker_events
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let event = events
            .values_mut()
            .flat_map(|list| list.iter_mut())
            .find(|e| &e.id == id)
            .ok_or_else(|| RepositoryError::InvalidData {
                store: "circuit_breaker",
                message: format!("unknown event {id}"),
            })?;
        event.resolve(at);
        drop(events);
        Ok(())
    }
}
