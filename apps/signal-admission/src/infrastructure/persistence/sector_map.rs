//! Static sector classification.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{RepositoryError, SectorLookup};
use crate::domain::portfolio::SectorInfo;
use crate::domain::shared::Symbol;

/// Sector lookup backed by a fixed symbol map.
#[derive(Debug, Clone, Default)]
pub struct StaticSectorMap {
    entries: HashMap<Symbol, SectorInfo>,
}

impl StaticSectorMap {
    /// Build from `(symbol, info)` pairs. Symbols are normalized.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SectorInfo)>,
        S: Into<Symbol>,
    {
        Self {
            entries: entries.into_iter().map(|(s, i)| (s.into(), i)).collect(),
        }
    }

    /// Number of classified symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no symbol is classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SectorLookup for StaticSectorMap {
    async fn get(&self, symbol: &Symbol) -> Result<Option<SectorInfo>, RepositoryError> {
        Ok(self.entries.get(symbol).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::portfolio::MarketCapCategory;

    #[tokio::test]
    async fn lookup_normalizes_symbols() {
        let map = StaticSectorMap::new([(
            "bbca.jk",
            SectorInfo::new("Banking", MarketCapCategory::Large),
        )]);
        let info = map.get(&Symbol::new("BBCA")).await.unwrap().unwrap();
        assert_eq!(info.sector, "Banking");
        assert!(map.get(&Symbol::new("TLKM")).await.unwrap().is_none());
    }
}
