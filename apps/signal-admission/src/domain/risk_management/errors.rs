//! Risk management errors.
//!
//! These describe malformed inputs. The validator turns them into rejection
//! results; they never escape as failures of the pipeline itself.

use rust_decimal::Decimal;
use std::fmt;

/// A candidate or sizing request that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Stop is at or above entry for a long position.
    InvalidStop {
        /// Entry price.
        entry: Decimal,
        /// Stop price.
        stop: Decimal,
    },

    /// Capital is zero or negative.
    NonPositiveCapital {
        /// Capital supplied.
        capital: Decimal,
    },

    /// A price is zero or negative.
    NonPositivePrice {
        /// Which price.
        field: &'static str,
        /// Value supplied.
        value: Decimal,
    },

    /// Risk fraction outside (0, ceiling].
    RiskOutOfRange {
        /// Value supplied.
        risk: Decimal,
        /// Allowed ceiling.
        max: Decimal,
    },

    /// Malformed symbol.
    InvalidSymbol {
        /// Validation message.
        message: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStop { entry, stop } => {
                write!(
                    f,
                    "Stop {stop} must be below entry {entry} for long positions"
                )
            }
            Self::NonPositiveCapital { capital } => {
                write!(f, "Capital must be > 0 (got {capital})")
            }
            Self::NonPositivePrice { field, value } => {
                write!(f, "Price '{field}' must be > 0 (got {value})")
            }
            Self::RiskOutOfRange { risk, max } => {
                write!(f, "Risk per trade {risk} outside (0, {max}]")
            }
            Self::InvalidSymbol { message } => write!(f, "Invalid symbol: {message}"),
        }
    }
}

impl std::error::Error for InputError {}
