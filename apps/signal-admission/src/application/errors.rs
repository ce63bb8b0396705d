//! Application errors.

/// Failure of the admission pipeline itself.
///
/// Rejected signals are not errors; they are returned as results. Only
/// faults that indicate a bug surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// An internal invariant did not hold.
    #[error("internal admission fault: {message}")]
    Internal {
        /// What was violated.
        message: String,
    },
}

impl AdmissionError {
    /// Create an internal fault.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
