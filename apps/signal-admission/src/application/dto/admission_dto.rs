//! Admission DTOs

use serde::{Deserialize, Serialize};

use crate::domain::portfolio::CandidateSignal;
use crate::domain::risk_management::RiskValidationResult;
use crate::domain::shared::{Symbol, UserId};

/// One candidate signal for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// Portfolio owner.
    pub user: UserId,
    /// Candidate signal.
    pub candidate: CandidateSignal,
}

impl AdmissionRequest {
    /// Create a request.
    #[must_use]
    pub const fn new(user: UserId, candidate: CandidateSignal) -> Self {
        Self { user, candidate }
    }
}

/// Decision returned to the signal pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    /// Portfolio owner.
    pub user: UserId,
    /// Candidate symbol.
    pub symbol: Symbol,
    /// Validation outcome.
    pub result: RiskValidationResult,
    /// Whether a position was opened.
    pub committed: bool,
}

impl AdmissionDecision {
    /// Short outcome label used in logs and metrics.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        if self.committed {
            "admitted"
        } else if self.result.passed {
            "approved"
        } else {
            "rejected"
        }
    }
}
