//! Sector classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::risk_management::constants::UNCLASSIFIED_SECTOR;

/// Market capitalisation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapCategory {
    /// Large cap.
    Large,
    /// Mid cap.
    Mid,
    /// Small cap (tighter exposure cap).
    Small,
}

impl MarketCapCategory {
    /// Whether the small-cap exposure cap applies.
    #[must_use]
    pub const fn is_small_cap(self) -> bool {
        matches!(self, Self::Small)
    }
}

impl fmt::Display for MarketCapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Large => write!(f, "large"),
            Self::Mid => write!(f, "mid"),
            Self::Small => write!(f, "small"),
        }
    }
}

/// Sector and size classification for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorInfo {
    /// Industry sector name.
    pub sector: String,
    /// Market cap bucket.
    pub market_cap: MarketCapCategory,
}

impl SectorInfo {
    /// Create sector info.
    #[must_use]
    pub fn new(sector: impl Into<String>, market_cap: MarketCapCategory) -> Self {
        Self {
            sector: sector.into(),
            market_cap,
        }
    }

    /// Classification used for symbols missing from the sector data.
    #[must_use]
    pub fn unclassified() -> Self {
        Self::new(UNCLASSIFIED_SECTOR, MarketCapCategory::Small)
    }
}
