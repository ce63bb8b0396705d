//! Per-sector concentration limit.

use std::collections::{BTreeSet, HashMap};

use crate::domain::portfolio::{OpenPosition, SectorInfo};
use crate::domain::risk_management::constants::UNCLASSIFIED_SECTOR;
use crate::domain::risk_management::messages;
use crate::domain::risk_management::value_objects::SectorCheck;
use crate::domain::shared::Symbol;

/// Caps concurrent open positions per industry sector.
///
/// Sectors in the exemption set are never counted. Positions whose sector is
/// unknown are treated as unclassified and not counted either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorDiversificationGuard {
    exempt_sectors: BTreeSet<String>,
}

impl Default for SectorDiversificationGuard {
    fn default() -> Self {
        Self::new([UNCLASSIFIED_SECTOR])
    }
}

impl SectorDiversificationGuard {
    /// Create a guard with an explicit exemption set.
    #[must_use]
    pub fn new<I, S>(exempt_sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exempt_sectors: exempt_sectors.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `sector` is excluded from the count.
    #[must_use]
    pub fn is_exempt(&self, sector: &str) -> bool {
        self.exempt_sectors.contains(sector)
    }

    /// Count open positions sharing `candidate_sector` and compare to the limit.
    ///
    /// The candidate symbol itself is skipped so re-evaluating an already
    /// open symbol does not count against itself.
    #[must_use]
    pub fn check_sector_limit(
        &self,
        candidate: &Symbol,
        candidate_sector: &str,
        positions: &[OpenPosition],
        sectors: &HashMap<Symbol, SectorInfo>,
        max_per_sector: u32,
    ) -> SectorCheck {
        if self.is_exempt(candidate_sector) {
            return SectorCheck {
                allowed: true,
                count: 0,
                max: max_per_sector,
                message: None,
            };
        }

        let count = positions
            .iter()
            .filter(|p| &p.symbol != candidate)
            .filter_map(|p| sectors.get(&p.symbol))
            .filter(|info| info.sector == candidate_sector)
            .count();
        let count = u32::try_from(count).unwrap_or(u32::MAX);

        let allowed = count < max_per_sector;
        SectorCheck {
            allowed,
            count,
            max: max_per_sector,
            message: (!allowed).then(|| messages::sector_limit(count, candidate_sector)),
        }
    }
}
