//! In-memory daily returns.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{RepositoryError, ReturnsProvider};
use crate::domain::shared::Symbol;

/// Returns provider backed by preloaded series.
#[derive(Debug, Default)]
pub struct InMemoryReturnsProvider {
    series: RwLock<HashMap<Symbol, Vec<f64>>>,
}

impl InMemoryReturnsProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the daily returns for `symbol`, oldest first.
    pub fn put(&self, symbol: impl Into<Symbol>, returns: Vec<f64>) {
        self.series
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.into(), returns);
    }
}

#[async_trait]
impl ReturnsProvider for InMemoryReturnsProvider {
    async fn trailing(&self, symbol: &Symbol, window: usize) -> Result<Vec<f64>, RepositoryError> {
        let series = self.series.read().unwrap_or_else(PoisonError::into_inner);
        Ok(series
            .get(symbol)
            .map(|s| s[s.len().saturating_sub(window)..].to_vec())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trailing_returns_tail() {
        let provider = InMemoryReturnsProvider::new();
        provider.put("BBCA", vec![0.1, 0.2, 0.3, 0.4]);
        let tail = provider.trailing(&Symbol::new("BBCA"), 2).await.unwrap();
        assert_eq!(tail, vec![0.3, 0.4]);
        let all = provider.trailing(&Symbol::new("BBCA"), 10).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(provider.trailing(&Symbol::new("TLKM"), 2).await.unwrap().is_empty());
    }
}
