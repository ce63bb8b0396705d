//! Portfolio Config Port (Driven Port)
//!
//! Read access to per-user portfolio limits.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::portfolio::PortfolioConfig;
use crate::domain::shared::UserId;

/// Port for loading a user's portfolio configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioConfigStore: Send + Sync {
    /// Configuration for `user`, or `None` if the user has not set one up.
    async fn get(&self, user: &UserId) -> Result<Option<PortfolioConfig>, RepositoryError>;
}
