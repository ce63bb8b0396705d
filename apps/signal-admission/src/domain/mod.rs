//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless admission rules
//!
//! # Bounded Contexts
//!
//! - [`portfolio`]: Portfolio configuration, positions, trade history, sectors
//! - [`risk_management`]: Heat, sizing, diversification, correlation, circuit breaker

pub mod portfolio;
pub mod risk_management;
pub mod shared;
