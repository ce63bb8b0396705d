//! Exposure cap chain.
//!
//! The cap for a candidate starts at the portfolio's per-position limit and
//! is transformed by each adjustment in order. New risk dimensions are added
//! as new adjustments rather than new branches in the sizer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which link of the chain produced the effective cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapSource {
    /// Per-position limit.
    Normal,
    /// Small-cap override.
    SmallCap,
    /// Correlation haircut.
    Correlation,
}

impl fmt::Display for CapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::SmallCap => write!(f, "small-cap"),
            Self::Correlation => write!(f, "correlation"),
        }
    }
}

/// One modifier in the cap chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapAdjustment {
    /// Replace the cap with the small-cap limit.
    SmallCap {
        /// Small-cap exposure limit.
        limit: Decimal,
    },
    /// Scale the cap because the candidate moves with the benchmark.
    Correlation {
        /// Observed correlation coefficient.
        correlation: f64,
        /// Multiplier applied to the incoming cap.
        factor: Decimal,
    },
}

impl CapAdjustment {
    /// Apply this adjustment to the incoming cap.
    #[must_use]
    pub fn apply(&self, cap: Decimal) -> Decimal {
        match self {
            Self::SmallCap { limit } => *limit,
            Self::Correlation { factor, .. } => cap.saturating_mul(*factor),
        }
    }

    /// Source label for caps produced by this adjustment.
    #[must_use]
    pub const fn source(&self) -> CapSource {
        match self {
            Self::SmallCap { .. } => CapSource::SmallCap,
            Self::Correlation { .. } => CapSource::Correlation,
        }
    }
}

/// The effective cap and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCap {
    /// Maximum exposure as a fraction of capital.
    pub limit: Decimal,
    /// Chain link that set the limit.
    pub source: CapSource,
}

/// Ordered cap modifiers applied left to right.
///
/// Each adjustment transforms the cap it receives, so a correlation haircut
/// after a small-cap override scales the small-cap limit, not the base limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureCapChain {
    base: Decimal,
    adjustments: Vec<CapAdjustment>,
}

impl ExposureCapChain {
    /// Start a chain at the per-position limit.
    #[must_use]
    pub const fn new(base: Decimal) -> Self {
        Self {
            base,
            adjustments: Vec::new(),
        }
    }

    /// Append an adjustment.
    #[must_use]
    pub fn then(mut self, adjustment: CapAdjustment) -> Self {
        self.adjustments.push(adjustment);
        self
    }

    /// Append an adjustment in place.
    pub fn push(&mut self, adjustment: CapAdjustment) {
        self.adjustments.push(adjustment);
    }

    /// Adjustments in application order.
    #[must_use]
    pub fn adjustments(&self) -> &[CapAdjustment] {
        &self.adjustments
    }

    /// Fold the chain into the effective cap.
    #[must_use]
    pub fn resolve(&self) -> AppliedCap {
        self.adjustments.iter().fold(
            AppliedCap {
                limit: self.base,
                source: CapSource::Normal,
            },
            |cap, adjustment| AppliedCap {
                limit: adjustment.apply(cap.limit),
                source: adjustment.source(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn base_cap_only() {
        let cap = ExposureCapChain::new(dec!(0.25)).resolve();
        assert_eq!(cap.limit, dec!(0.25));
        assert_eq!(cap.source, CapSource::Normal);
    }

    #[test]
    fn small_cap_overrides_base() {
        let cap = ExposureCapChain::new(dec!(0.25))
            .then(CapAdjustment::SmallCap { limit: dec!(0.15) })
            .resolve();
        assert_eq!(cap.limit, dec!(0.15));
        assert_eq!(cap.source, CapSource::SmallCap);
    }

    #[test]
    fn correlation_halves_incoming_cap() {
        let normal = ExposureCapChain::new(dec!(0.25))
            .then(CapAdjustment::Correlation {
                correlation: 0.85,
                factor: dec!(0.5),
            })
            .resolve();
        assert_eq!(normal.limit, dec!(0.125));
        assert_eq!(normal.source, CapSource::Correlation);

        let small = ExposureCapChain::new(dec!(0.25))
            .then(CapAdjustment::SmallCap { limit: dec!(0.15) })
            .then(CapAdjustment::Correlation {
                correlation: 0.85,
                factor: dec!(0.5),
            })
            .resolve();
        assert_eq!(small.limit, dec!(0.075));
    }

    #[test]
    fn cap_source_display() {
        assert_eq!(CapSource::SmallCap.to_string(), "small-cap");
        assert_eq!(CapSource::Correlation.to_string(), "correlation");
    }
}
