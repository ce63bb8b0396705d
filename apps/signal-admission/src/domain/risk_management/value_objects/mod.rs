//! Risk Management Value Objects

mod breaker_status;
mod circuit_breaker_event;
mod correlation_check;
mod exposure_cap;
mod heat;
mod sector_check;
mod sizing;
mod validation_result;

pub use breaker_status::{BreakerState, CircuitBreakerStatus};
pub use circuit_breaker_event::{CircuitBreakerEvent, TriggerType};
pub use correlation_check::CorrelationCheck;
pub use exposure_cap::{AppliedCap, CapAdjustment, CapSource, ExposureCapChain};
pub use heat::{HeatLevel, HeatProjection, HeatStatus, PositionHeat};
pub use sector_check::SectorCheck;
pub use sizing::SizingResult;
pub use validation_result::{ApprovedSize, BreakerTransition, RiskValidationResult, Verdict};
