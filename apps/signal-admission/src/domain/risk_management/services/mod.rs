//! Risk Management Domain Services

mod circuit_breaker;
mod correlation_guard;
mod heat_monitor;
mod position_sizer;
mod risk_validator;
mod sector_guard;

pub use circuit_breaker::CircuitBreaker;
pub use correlation_guard::{CorrelationGuard, pearson};
pub use heat_monitor::HeatMonitor;
pub use position_sizer::PositionSizer;
pub use risk_validator::{
    NewTriggerPolicy, RiskSettings, RiskValidator, TrailingReturns, ValidationInput,
};
pub use sector_guard::SectorDiversificationGuard;
