//! Sector Lookup Port (Driven Port)

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::portfolio::SectorInfo;
use crate::domain::shared::Symbol;

/// Port for symbol classification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectorLookup: Send + Sync {
    /// Sector and market-cap category of `symbol`; `None` when unknown.
    async fn get(&self, symbol: &Symbol) -> Result<Option<SectorInfo>, RepositoryError>;
}
