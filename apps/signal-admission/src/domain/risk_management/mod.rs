//! Risk Management Bounded Context
//!
//! Decides whether a candidate signal may become a sized position.
//!
//! # Key Concepts
//!
//! - **Heat**: aggregate fraction of capital at risk across open positions
//! - **Lot**: exchange trading unit (100 shares); sizes are whole lots
//! - **Exposure cap chain**: base cap, small-cap override, correlation haircut
//! - **Circuit breaker**: suspension after drawdown or a losing streak
//!
//! Everything here is synchronous and free of I/O. Repository reads and the
//! per-portfolio serialization live in the application layer.

pub mod constants;
pub mod errors;
pub mod messages;
pub mod services;
pub mod value_objects;

pub use errors::InputError;
pub use services::{
    CircuitBreaker, CorrelationGuard, HeatMonitor, NewTriggerPolicy, PositionSizer, RiskSettings,
    RiskValidator, SectorDiversificationGuard, TrailingReturns, ValidationInput, pearson,
};
pub use value_objects::{
    AppliedCap, ApprovedSize, BreakerState, BreakerTransition, CapAdjustment, CapSource, CircuitBreakerEvent,
    CircuitBreakerStatus, CorrelationCheck, ExposureCapChain, HeatLevel, HeatProjection,
    HeatStatus, PositionHeat, RiskValidationResult, SectorCheck, SizingResult, TriggerType,
    Verdict,
};
