//! Application Ports (Driven)
//!
//! Narrow interfaces to the collaborators the admission pipeline reads from
//! and writes to. Implementations live in the infrastructure layer.

mod circuit_breaker_port;
mod clock_port;
mod open_position_port;
mod portfolio_config_port;
mod repository_error;
mod returns_provider_port;
mod sector_lookup_port;
mod trade_history_port;

pub use circuit_breaker_port::CircuitBreakerStore;
pub use clock_port::{Clock, FixedClock, SystemClock};
pub use open_position_port::OpenPositionStore;
pub use portfolio_config_port::PortfolioConfigStore;
pub use repository_error::RepositoryError;
pub use returns_provider_port::ReturnsProvider;
pub use sector_lookup_port::SectorLookup;
pub use trade_history_port::ClosedTradeHistory;

#[cfg(test)]
pub use circuit_breaker_port::MockCircuitBreakerStore;
#[cfg(test)]
pub use open_position_port::MockOpenPositionStore;
#[cfg(test)]
pub use portfolio_config_port::MockPortfolioConfigStore;
