//! Closed Trade History Port (Driven Port)

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::portfolio::ClosedTrade;
use crate::domain::shared::UserId;

/// Port for realized trade history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClosedTradeHistory: Send + Sync {
    /// All closed trades for `user`, in any order.
    async fn list(&self, user: &UserId) -> Result<Vec<ClosedTrade>, RepositoryError>;
}
