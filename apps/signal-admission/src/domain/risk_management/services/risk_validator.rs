//! Admission orchestrator.
//!
//! Runs the rules in a fixed order and stops at the first blocking one:
//!
//! 1. circuit breaker
//! 2. portfolio heat
//! 3. sector concentration
//! 4. position sizing (base cap, then small-cap override)
//! 5. benchmark correlation (cap haircut, re-clamp)
//! 6. projected heat using the risk actually taken
//!
//! Every "not approved" outcome is returned as a result, never as an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    CircuitBreaker, CorrelationGuard, HeatMonitor, PositionSizer, SectorDiversificationGuard,
};
use crate::domain::portfolio::{
    CandidateSignal, ClosedTrade, OpenPosition, PortfolioConfig, SectorInfo,
};
use crate::domain::risk_management::constants::{
    CORRELATION_CAP_FACTOR, CORRELATION_LOOKBACK_DAYS,
};
use crate::domain::risk_management::errors::InputError;
use crate::domain::risk_management::messages;
use crate::domain::risk_management::value_objects::{
    ApprovedSize, BreakerState, BreakerTransition, CapAdjustment, CircuitBreakerEvent,
    ExposureCapChain, HeatLevel, RiskValidationResult, Verdict,
};
use crate::domain::shared::Symbol;

/// What to do with a trigger that fires during the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewTriggerPolicy {
    /// Reject the current signal.
    #[default]
    HardBlock,
    /// Size the current signal with the suspension's reduced risk.
    ReduceRisk,
}

/// Process-wide rule settings. Per-user limits live in [`PortfolioConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSettings {
    /// Lot rounding and wide-stop warning.
    pub sizer: PositionSizer,
    /// Breaker triggers and suspension lengths.
    pub breaker: CircuitBreaker,
    /// Sector exemption set.
    pub sector_guard: SectorDiversificationGuard,
    /// Observations needed for a correlation reading.
    pub correlation_lookback: usize,
    /// Multiplier applied to the cap when correlation is high.
    pub correlation_cap_factor: Decimal,
    /// Handling of a freshly fired trigger.
    pub on_new_trigger: NewTriggerPolicy,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            sizer: PositionSizer::default(),
            breaker: CircuitBreaker::default(),
            sector_guard: SectorDiversificationGuard::default(),
            correlation_lookback: CORRELATION_LOOKBACK_DAYS,
            correlation_cap_factor: CORRELATION_CAP_FACTOR,
            on_new_trigger: NewTriggerPolicy::default(),
        }
    }
}

/// Daily returns of the candidate and the benchmark, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailingReturns {
    /// Candidate symbol returns.
    pub candidate: Vec<f64>,
    /// Benchmark index returns.
    pub benchmark: Vec<f64>,
}

/// Everything one validation reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationInput {
    /// Signal under evaluation.
    pub candidate: CandidateSignal,
    /// Owner's portfolio limits.
    pub config: PortfolioConfig,
    /// Open positions snapshot.
    pub open_positions: Vec<OpenPosition>,
    /// Sector data for the open positions.
    pub position_sectors: HashMap<Symbol, SectorInfo>,
    /// Sector data for the candidate.
    pub candidate_sector: SectorInfo,
    /// Closed trade history.
    pub closed_trades: Vec<ClosedTrade>,
    /// Unresolved suspension record, if any.
    pub active_suspension: Option<CircuitBreakerEvent>,
    /// Start of the most recent resolved suspension.
    pub resume_after: Option<DateTime<Utc>>,
    /// Trailing returns; correlation is skipped when absent.
    pub returns: Option<TrailingReturns>,
    /// Evaluation time.
    pub now: DateTime<Utc>,
}

impl ValidationInput {
    /// Input with an empty portfolio and an unclassified candidate.
    #[must_use]
    pub fn new(candidate: CandidateSignal, config: PortfolioConfig, now: DateTime<Utc>) -> Self {
        Self {
            candidate,
            config,
            open_positions: Vec::new(),
            position_sectors: HashMap::new(),
            candidate_sector: SectorInfo::unclassified(),
            closed_trades: Vec::new(),
            active_suspension: None,
            resume_after: None,
            returns: None,
            now,
        }
    }

    /// Set the open positions.
    #[must_use]
    pub fn with_positions(mut self, positions: Vec<OpenPosition>) -> Self {
        self.open_positions = positions;
        self
    }

    /// Set sector data for open positions.
    #[must_use]
    pub fn with_position_sectors(mut self, sectors: HashMap<Symbol, SectorInfo>) -> Self {
        self.position_sectors = sectors;
        self
    }

    /// Set the candidate's sector.
    #[must_use]
    pub fn with_candidate_sector(mut self, sector: SectorInfo) -> Self {
        self.candidate_sector = sector;
        self
    }

    /// Set the closed trade history.
    #[must_use]
    pub fn with_closed_trades(mut self, trades: Vec<ClosedTrade>) -> Self {
        self.closed_trades = trades;
        self
    }

    /// Set the unresolved suspension record.
    #[must_use]
    pub fn with_active_suspension(mut self, event: Option<CircuitBreakerEvent>) -> Self {
        self.active_suspension = event;
        self
    }

    /// Set the start of the last resolved suspension.
    #[must_use]
    pub const fn with_resume_after(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.resume_after = at;
        self
    }

    /// Set trailing returns.
    #[must_use]
    pub fn with_returns(mut self, returns: Option<TrailingReturns>) -> Self {
        self.returns = returns;
        self
    }
}

/// Sequences the admission rules into one decision.
#[derive(Debug, Clone, Default)]
pub struct RiskValidator {
    settings: RiskSettings,
}

impl RiskValidator {
    /// Create a validator.
    #[must_use]
    pub const fn new(settings: RiskSettings) -> Self {
        Self { settings }
    }

    /// Rule settings in use.
    #[must_use]
    pub const fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// Decide whether `input.candidate` may become a position and how large.
    ///
    /// Pure: identical inputs give identical results. Breaker changes that
    /// must be stored are returned in `breaker_transitions`.
    #[must_use]
    pub fn validate(&self, input: &ValidationInput) -> RiskValidationResult {
        let config = &input.config;
        let candidate = &input.candidate;
        let capital = config.total_capital;

        if let Err(err) = Self::check_input(input) {
            return RiskValidationResult::rejected(Verdict::Wait, format!("Invalid input: {err}"));
        }

        let mut warnings = Vec::new();
        let mut transitions = Vec::new();
        let mut risk_pct = config.risk_per_trade;

        // 1. Circuit breaker
        if config.circuit_breaker_enabled {
            let status = self.settings.breaker.check(
                &config.user,
                &input.closed_trades,
                capital,
                input.active_suspension.as_ref(),
                input.resume_after,
                input.now,
            );
            if let Some(event_id) = status.expired {
                transitions.push(BreakerTransition::Expired { event_id });
            }
            match status.state {
                BreakerState::Inactive => {}
                BreakerState::AlreadySuspended { .. } => {
                    return RiskValidationResult::rejected(Verdict::Suspended, status.message)
                        .with_transitions(transitions);
                }
                BreakerState::NewlyTriggered { event } => {
                    let risk_override = event.risk_override;
                    transitions.push(BreakerTransition::Triggered { event });
                    match self.settings.on_new_trigger {
                        NewTriggerPolicy::HardBlock => {
                            return RiskValidationResult::rejected(
                                Verdict::Suspended,
                                status.message,
                            )
                            .with_transitions(transitions);
                        }
                        NewTriggerPolicy::ReduceRisk => {
                            warnings.push(status.message);
                            warnings.push(messages::risk_reduced(risk_override));
                            risk_pct = risk_pct.min(risk_override);
                        }
                    }
                }
            }
        }

        // 2. Portfolio heat
        let heat = HeatMonitor::for_portfolio(config).compute_heat(
            &input.open_positions,
            capital,
            config.max_heat,
        );
        let heat_before = heat.current_heat;
        let reject = |reason: String, heat_after: Decimal, warnings: Vec<String>| {
            RiskValidationResult::rejected(Verdict::Wait, reason)
                .with_heat(heat_before, heat_after)
                .with_warnings(warnings)
                .with_transitions(transitions.clone())
        };

        match heat.status {
            HeatLevel::Limit => {
                return reject(messages::heat_limit_reached(heat_before), heat_before, warnings);
            }
            HeatLevel::Warning => warnings.push(messages::heat_high(heat_before, config.max_heat)),
            HeatLevel::Safe => {}
        }
        if !heat.cash_reserve_ok {
            warnings.push(messages::cash_reserve_low(
                heat.cash_reserve_pct,
                config.cash_reserve_target,
            ));
        }

        // 3. Sector concentration
        let sector = self.settings.sector_guard.check_sector_limit(
            &candidate.symbol,
            &input.candidate_sector.sector,
            &input.open_positions,
            &input.position_sectors,
            config.max_positions_per_sector,
        );
        if !sector.allowed {
            let reason = sector.message.unwrap_or_else(|| {
                messages::sector_limit(sector.count, &input.candidate_sector.sector)
            });
            return reject(reason, heat_before, warnings);
        }

        // 4. Sizing
        let mut caps = ExposureCapChain::new(config.max_exposure_pct);
        if input.candidate_sector.market_cap.is_small_cap() {
            caps.push(CapAdjustment::SmallCap {
                limit: config.max_small_cap_exposure_pct,
            });
        }
        let sizer = &self.settings.sizer;
        let mut sizing = match sizer.size(
            capital,
            risk_pct,
            candidate.entry_price,
            candidate.stop_price,
            &caps,
        ) {
            Ok(sizing) => sizing,
            Err(err) => return reject(format!("Sizing error: {err}"), heat_before, warnings),
        };
        warnings.append(&mut sizing.warnings);

        // 5. Correlation
        if let Some(returns) = &input.returns {
            let check = CorrelationGuard::new(
                self.settings.correlation_lookback,
                config.correlation_threshold,
            )
            .should_reduce(&returns.candidate, &returns.benchmark);
            if check.reduce {
                caps.push(CapAdjustment::Correlation {
                    correlation: check.correlation,
                    factor: self.settings.correlation_cap_factor,
                });
                let (clamped, shrunk) = sizer.clamp(sizing, &caps, capital, candidate.entry_price);
                sizing = clamped;
                if shrunk {
                    warnings.push(messages::correlation_capped(
                        check.correlation,
                        sizing.applied_cap.limit,
                    ));
                }
            }
        }

        if sizing.shares == 0 {
            return reject(messages::below_one_lot(sizer.lot_size()), heat_before, warnings);
        }

        // 6. Projected heat with the risk actually taken
        let risk_taken = sizing.actual_risk(capital);
        let projection = HeatMonitor::project_heat(heat_before, risk_taken, config.max_heat);
        if projection.would_exceed {
            return reject(
                messages::heat_projection_exceeded(projection.projected_heat, config.max_heat),
                projection.projected_heat,
                warnings,
            );
        }

        RiskValidationResult::approved(
            ApprovedSize {
                lots: sizing.lots,
                shares: sizing.shares,
                exposure_pct: sizing.exposure_pct,
                applied_cap: sizing.applied_cap,
                risk_taken,
            },
            heat_before,
            projection.projected_heat,
            warnings,
        )
        .with_transitions(transitions)
    }

    fn check_input(input: &ValidationInput) -> Result<(), InputError> {
        input
            .candidate
            .symbol
            .validate()
            .map_err(|e| InputError::InvalidSymbol {
                message: e.to_string(),
            })?;
        let capital = input.config.total_capital;
        if capital <= Decimal::ZERO {
            return Err(InputError::NonPositiveCapital { capital });
        }
        Ok(())
    }
}
