//! Sector classification configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::portfolio::{MarketCapCategory, SectorInfo};
use crate::domain::risk_management::constants::UNCLASSIFIED_SECTOR;

/// Sector exemptions, defaults and static classification entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorsConfig {
    /// Sectors excluded from the per-sector count.
    #[serde(default = "default_unclassified")]
    pub unclassified: Vec<String>,
    /// Sector assigned to unknown symbols.
    #[serde(default = "default_sector")]
    pub default_sector: String,
    /// Market cap assigned to unknown symbols.
    #[serde(default = "default_market_cap")]
    pub default_market_cap: MarketCapCategory,
    /// Static symbol classification.
    #[serde(default)]
    pub map: BTreeMap<String, SectorInfo>,
}

impl Default for SectorsConfig {
    fn default() -> Self {
        Self {
            unclassified: default_unclassified(),
            default_sector: default_sector(),
            default_market_cap: default_market_cap(),
            map: BTreeMap::new(),
        }
    }
}

impl SectorsConfig {
    /// Classification for symbols missing from the sector data.
    #[must_use]
    pub fn fallback(&self) -> SectorInfo {
        SectorInfo::new(self.default_sector.clone(), self.default_market_cap)
    }
}

fn default_unclassified() -> Vec<String> {
    vec![UNCLASSIFIED_SECTOR.to_string()]
}

fn default_sector() -> String {
    UNCLASSIFIED_SECTOR.to_string()
}

const fn default_market_cap() -> MarketCapCategory {
    MarketCapCategory::Small
}
