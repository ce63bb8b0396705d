//! Sector diversification check result.

use serde::{Deserialize, Serialize};

/// Outcome of the per-sector position limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorCheck {
    /// Whether another position in the sector is allowed.
    pub allowed: bool,
    /// Open positions already counted against the sector.
    pub count: u32,
    /// Configured limit.
    pub max: u32,
    /// Rejection message when not allowed.
    pub message: Option<String>,
}
