//! Symbol value object for exchange tickers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// An exchange ticker (e.g. "BBCA", "TLKM").
///
/// Normalized to uppercase; an optional `.JK` exchange suffix is stripped so
/// that data-provider symbols and journal symbols compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let upper = value.into().trim().to_uppercase();
        let bare = upper.strip_suffix(".JK").map_or(upper.clone(), str::to_string);
        Self(bare)
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the symbol.
    ///
    /// # Errors
    ///
    /// Returns error if symbol is empty or contains invalid characters.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::invalid("symbol", "Symbol cannot be empty"));
        }

        if !self.0.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol contains invalid characters",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
