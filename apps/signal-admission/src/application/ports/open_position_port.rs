//! Open Position Port (Driven Port)
//!
//! Snapshot of open positions and the commit point for admitted signals.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::portfolio::OpenPosition;
use crate::domain::shared::UserId;

/// Port for reading and opening positions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenPositionStore: Send + Sync {
    /// Positions currently open for `user`.
    async fn list_open(&self, user: &UserId) -> Result<Vec<OpenPosition>, RepositoryError>;

    /// Record a newly admitted position.
    async fn open_position(
        &self,
        user: &UserId,
        position: OpenPosition,
    ) -> Result<(), RepositoryError>;
}
