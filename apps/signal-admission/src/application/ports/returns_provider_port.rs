//! Returns Provider Port (Driven Port)

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::shared::Symbol;

/// Port for trailing daily returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReturnsProvider: Send + Sync {
    /// Up to `window` most recent daily returns for `symbol`, oldest first.
    ///
    /// An unknown symbol yields an empty series.
    async fn trailing(&self, symbol: &Symbol, window: usize) -> Result<Vec<f64>, RepositoryError>;
}
