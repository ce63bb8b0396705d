//! Shared error type for driven ports.

/// Failure reading from or writing to a collaborator store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached.
    #[error("{store} unavailable: {message}")]
    Unavailable {
        /// Store name.
        store: &'static str,
        /// Underlying cause.
        message: String,
    },

    /// The store answered with data that cannot be used.
    #[error("{store} returned invalid data: {message}")]
    InvalidData {
        /// Store name.
        store: &'static str,
        /// What was wrong.
        message: String,
    },
}

impl RepositoryError {
    /// Create an unavailable error.
    pub fn unavailable(store: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            store,
            message: message.into(),
        }
    }

    /// Name of the failing store.
    #[must_use]
    pub const fn store(&self) -> &'static str {
        match self {
            Self::Unavailable { store, .. } | Self::InvalidData { store, .. } => store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_store() {
        let err = RepositoryError::unavailable("open_positions", "connection refused");
        assert_eq!(err.to_string(), "open_positions unavailable: connection refused");
        assert_eq!(err.store(), "open_positions");
    }
}
