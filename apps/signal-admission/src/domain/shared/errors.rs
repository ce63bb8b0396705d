//! Domain errors for the signal admission pipeline.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::invalid("total_capital", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'total_capital': must be positive"
        );
    }
}
