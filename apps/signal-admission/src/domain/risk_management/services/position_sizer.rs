//! Lot-based position sizing.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::domain::risk_management::constants::{
    LOT_SIZE, MAX_RISK_PER_TRADE, WIDE_STOP_THRESHOLD,
};
use crate::domain::risk_management::errors::InputError;
use crate::domain::risk_management::messages;
use crate::domain::risk_management::value_objects::{ExposureCapChain, SizingResult};

/// Converts a risk budget and stop distance into whole exchange lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSizer {
    lot_size: u64,
    wide_stop_threshold: Decimal,
    max_risk_per_trade: Decimal,
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(LOT_SIZE, WIDE_STOP_THRESHOLD, MAX_RISK_PER_TRADE)
    }
}

impl PositionSizer {
    /// Create a sizer.
    ///
    /// A `lot_size` of zero is treated as one share.
    #[must_use]
    pub const fn new(
        lot_size: u64,
        wide_stop_threshold: Decimal,
        max_risk_per_trade: Decimal,
    ) -> Self {
        Self {
            lot_size: if lot_size == 0 { 1 } else { lot_size },
            wide_stop_threshold,
            max_risk_per_trade,
        }
    }

    /// Shares per lot.
    #[must_use]
    pub const fn lot_size(&self) -> u64 {
        self.lot_size
    }

    /// Size a long position.
    ///
    /// Risk amount is `capital × risk_pct`; raw shares are the risk amount
    /// divided by the stop distance, rounded down to whole lots. If the
    /// resulting exposure breaches the cap resolved from `caps`, shares are
    /// recomputed from the cap and a warning names the cap applied.
    pub fn size(
        &self,
        capital: Decimal,
        risk_pct: Decimal,
        entry: Decimal,
        stop: Decimal,
        caps: &ExposureCapChain,
    ) -> Result<SizingResult, InputError> {
        self.validate_input(capital, risk_pct, entry, stop)?;

        let mut warnings = Vec::new();
        let risk_amount = capital.saturating_mul(risk_pct);
        let stop_distance = entry - stop;
        let stop_distance_pct = stop_distance / entry;

        if stop_distance_pct > self.wide_stop_threshold {
            warnings.push(messages::stop_too_wide(
                stop_distance_pct,
                self.wide_stop_threshold,
            ));
        }

        // Sub-unit stops can overflow the quotient; saturate and let the cap clamp it.
        let raw_shares = risk_amount
            .checked_div(stop_distance)
            .unwrap_or(Decimal::MAX)
            .floor();
        let sizing = SizingResult {
            risk_amount,
            stop_distance,
            stop_distance_pct,
            shares: 0,
            lots: 0,
            exposure: Decimal::ZERO,
            exposure_pct: Decimal::ZERO,
            applied_cap: caps.resolve(),
            capped: false,
            warnings,
        };
        let sizing = self.with_shares(sizing, self.round_to_lot(raw_shares), capital, entry);

        let (mut sizing, capped) = self.clamp(sizing, caps, capital, entry);
        if capped {
            let cap = sizing.applied_cap;
            sizing.warnings.push(messages::exposure_capped(
                sizing.exposure_pct,
                cap.limit,
                &cap.source.to_string(),
            ));
        }
        Ok(sizing)
    }

    /// Re-check an existing sizing against a (possibly tightened) cap chain.
    ///
    /// Returns the updated sizing and whether shares were reduced. The
    /// reported cap always reflects `caps`.
    #[must_use]
    pub fn clamp(
        &self,
        mut sizing: SizingResult,
        caps: &ExposureCapChain,
        capital: Decimal,
        entry: Decimal,
    ) -> (SizingResult, bool) {
        let cap = caps.resolve();
        sizing.applied_cap = cap;

        if sizing.exposure_pct <= cap.limit || capital <= Decimal::ZERO || entry <= Decimal::ZERO {
            return (sizing, false);
        }

        let max_shares = cap
            .limit
            .saturating_mul(capital)
            .checked_div(entry)
            .unwrap_or(Decimal::MAX)
            .floor();
        let shares = self.round_to_lot(max_shares);
        let mut sizing = self.with_shares(sizing, shares, capital, entry);
        sizing.capped = true;
        (sizing, true)
    }

    fn with_shares(
        &self,
        mut sizing: SizingResult,
        shares: u64,
        capital: Decimal,
        entry: Decimal,
    ) -> SizingResult {
        let exposure = Decimal::from(shares)
            .checked_mul(entry)
            .unwrap_or(Decimal::MAX);
        sizing.shares = shares;
        sizing.lots = shares / self.lot_size;
        sizing.exposure = exposure;
        sizing.exposure_pct = exposure.checked_div(capital).unwrap_or(Decimal::MAX);
        sizing
    }

    fn round_to_lot(&self, raw_shares: Decimal) -> u64 {
        let lots = (raw_shares / Decimal::from(self.lot_size))
            .floor()
            .max(Decimal::ZERO);
        lots.to_u64()
            .unwrap_or(u64::MAX / self.lot_size)
            .saturating_mul(self.lot_size)
    }

    fn validate_input(
        &self,
        capital: Decimal,
        risk_pct: Decimal,
        entry: Decimal,
        stop: Decimal,
    ) -> Result<(), InputError> {
        if capital <= Decimal::ZERO {
            return Err(InputError::NonPositiveCapital { capital });
        }
        if entry <= Decimal::ZERO {
            return Err(InputError::NonPositivePrice {
                field: "entry",
                value: entry,
            });
        }
        if stop <= Decimal::ZERO {
            return Err(InputError::NonPositivePrice {
                field: "stop",
                value: stop,
            });
        }
        if stop >= entry {
            return Err(InputError::InvalidStop { entry, stop });
        }
        if risk_pct <= Decimal::ZERO || risk_pct > self.max_risk_per_trade {
            return Err(InputError::RiskOutOfRange {
                risk: risk_pct,
                max: self.max_risk_per_trade,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_management::value_objects::{CapAdjustment, CapSource};
    use rust_decimal_macros::dec;

    fn normal() -> ExposureCapChain {
        ExposureCapChain::new(dec!(0.25))
    }

    fn small_cap() -> ExposureCapChain {
        normal().then(CapAdjustment::SmallCap { limit: dec!(0.15) })
    }

    #[test]
    fn sizes_within_cap() {
        let sizing = PositionSizer::default()
            .size(dec!(1_000_000_000), dec!(0.01), dec!(7_200), dec!(6_800), &normal())
            .unwrap();
        assert_eq!(sizing.risk_amount, dec!(10_000_000));
        assert_eq!(sizing.stop_distance, dec!(400));
        assert_eq!(sizing.shares, 25_000);
        assert_eq!(sizing.lots, 250);
        assert_eq!(sizing.exposure, dec!(180_000_000));
        assert_eq!(sizing.exposure_pct, dec!(0.18));
        assert!(!sizing.capped);
        assert!(sizing.warnings.is_empty());
    }

    #[test]
    fn caps_tight_stop_at_normal_limit() {
        let sizing = PositionSizer::default()
            .size(dec!(1_000_000_000), dec!(0.01), dec!(1_000), dec!(999), &normal())
            .unwrap();
        assert_eq!(sizing.shares, 250_000);
        assert_eq!(sizing.lots, 2_500);
        assert_eq!(sizing.exposure_pct, dec!(0.25));
        assert!(sizing.capped);
        assert_eq!(sizing.applied_cap.source, CapSource::Normal);
        assert_eq!(sizing.warnings.len(), 1);
        assert!(sizing.warnings[0].contains("normal cap"));
    }

    #[test]
    fn small_cap_uses_lower_limit() {
        let sizing = PositionSizer::default()
            .size(dec!(1_000_000_000), dec!(0.01), dec!(1_000), dec!(999), &small_cap())
            .unwrap();
        assert_eq!(sizing.shares, 150_000);
        assert_eq!(sizing.exposure_pct, dec!(0.15));
        assert!(sizing.warnings[0].contains("small-cap cap"));
    }

    #[test]
    fn rounds_down_to_lot() {
        // 1,000,000 / 300 = 3,333.33 shares -> 3,300
        let sizing = PositionSizer::default()
            .size(dec!(100_000_000), dec!(0.01), dec!(5_000), dec!(4_700), &normal())
            .unwrap();
        assert_eq!(sizing.shares, 3_300);
        assert_eq!(sizing.lots, 33);
        assert_eq!(sizing.shares % 100, 0);
    }

    #[test]
    fn below_one_lot_yields_zero_shares() {
        // 100,000 / 2,000 = 50 shares
        let sizing = PositionSizer::default()
            .size(dec!(10_000_000), dec!(0.01), dec!(10_000), dec!(8_000), &normal())
            .unwrap();
        assert_eq!(sizing.shares, 0);
        assert_eq!(sizing.lots, 0);
    }

    #[test]
    fn wide_stop_warns() {
        let sizing = PositionSizer::default()
            .size(dec!(1_000_000_000), dec!(0.01), dec!(1_000), dec!(800), &normal())
            .unwrap();
        assert!(sizing.warnings.iter().any(|w| w.contains("Stop unusually wide")));
    }

    #[test]
    fn rejects_stop_at_or_above_entry() {
        let err = PositionSizer::default()
            .size(dec!(1_000_000), dec!(0.01), dec!(1_000), dec!(1_000), &normal())
            .unwrap_err();
        assert!(matches!(err, InputError::InvalidStop { .. }));
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let sizer = PositionSizer::default();
        assert!(matches!(
            sizer.size(Decimal::ZERO, dec!(0.01), dec!(1_000), dec!(900), &normal()),
            Err(InputError::NonPositiveCapital { .. })
        ));
        assert!(matches!(
            sizer.size(dec!(1_000_000), dec!(0.01), dec!(1_000), Decimal::ZERO, &normal()),
            Err(InputError::NonPositivePrice { field: "stop", .. })
        ));
        assert!(matches!(
            sizer.size(dec!(1_000_000), dec!(0.06), dec!(1_000), dec!(900), &normal()),
            Err(InputError::RiskOutOfRange { .. })
        ));
    }

    #[test]
    fn clamp_with_correlation_haircut() {
        let sizer = PositionSizer::default();
        let sizing = sizer
            .size(dec!(1_000_000_000), dec!(0.01), dec!(7_200), dec!(6_800), &normal())
            .unwrap();
        let caps = normal().then(CapAdjustment::Correlation {
            correlation: 0.9,
            factor: dec!(0.5),
        });
        let (sizing, shrunk) = sizer.clamp(sizing, &caps, dec!(1_000_000_000), dec!(7_200));
        assert!(shrunk);
        assert_eq!(sizing.applied_cap.limit, dec!(0.125));
        // 125,000,000 / 7,200 = 17,361 -> 17,300
        assert_eq!(sizing.shares, 17_300);
        assert!(sizing.exposure_pct <= dec!(0.125));
    }

    #[test]
    fn sub_unit_stop_saturates_then_caps() {
        let sizing = PositionSizer::default()
            .size(
                dec!(1_000_000_000),
                dec!(0.01),
                dec!(1.0000000000000000000001),
                dec!(1),
                &normal(),
            )
            .unwrap();
        assert!(sizing.capped);
        assert_eq!(sizing.shares, 249_999_900);
        assert_eq!(sizing.lots, 2_499_999);
        assert!(sizing.exposure_pct <= dec!(0.25));
        assert!(sizing.actual_risk(dec!(1_000_000_000)) > Decimal::ZERO);
    }

    #[test]
    fn actual_risk_saturates_instead_of_overflowing() {
        let sizing = SizingResult {
            risk_amount: Decimal::ZERO,
            stop_distance: Decimal::MAX,
            stop_distance_pct: Decimal::ZERO,
            shares: 100,
            lots: 1,
            exposure: Decimal::ZERO,
            exposure_pct: Decimal::ZERO,
            applied_cap: normal().resolve(),
            capped: false,
            warnings: Vec::new(),
        };
        assert_eq!(sizing.actual_risk(dec!(0.5)), Decimal::MAX);
    }

    #[test]
    fn clamp_leaves_small_position_alone() {
        let sizer = PositionSizer::default();
        let sizing = sizer
            .size(dec!(1_000_000_000), dec!(0.01), dec!(1_000), dec!(900), &normal())
            .unwrap();
        let before = sizing.shares;
        let caps = normal().then(CapAdjustment::Correlation {
            correlation: 0.9,
            factor: dec!(0.5),
        });
        let (sizing, shrunk) = sizer.clamp(sizing, &caps, dec!(1_000_000_000), dec!(1_000));
        assert!(!shrunk);
        assert_eq!(sizing.shares, before);
        assert_eq!(sizing.applied_cap.source, CapSource::Correlation);
    }
}
