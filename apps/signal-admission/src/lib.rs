// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Signal Admission - Rust Core Library
//!
//! Deterministic risk gate deciding whether a directional trading signal may
//! become a sized position, and how large that position may be.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure rule logic with no I/O
//!   - `portfolio`: Portfolio limits, open positions, closed trades, candidates
//!   - `risk_management`: Heat, sizing, sector, correlation, circuit breaker,
//!     and the validator that sequences them
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Store traits (`PortfolioConfigStore`, `OpenPositionStore`, ...)
//!   - `use_cases`: `AdmitSignalUseCase` with per-user validate→commit
//!   - `dto`: Admission requests and decisions
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory stores, static sector map, returns provider
//!   - `scenario`: JSON fixtures for the binary and integration tests
//!
//! Configuration, metrics and logging setup live in `config`, `observability`
//! and `telemetry`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Prometheus metrics.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::portfolio::{
    CandidateSignal, ClosedTrade, MarketCapCategory, OpenPosition, PortfolioConfig, SectorInfo,
};
pub use domain::risk_management::{
    CircuitBreakerEvent, RiskSettings, RiskValidationResult, RiskValidator, ValidationInput,
    Verdict,
};
pub use domain::shared::{EventId, Symbol, UserId};

// Application re-exports
pub use application::dto::{AdmissionDecision, AdmissionRequest};
pub use application::errors::AdmissionError;
pub use application::use_cases::{AdmissionOptions, AdmissionPorts, AdmitSignalUseCase};

// Infrastructure re-exports
pub use infrastructure::persistence::{
    InMemoryPortfolioStore, InMemoryReturnsProvider, StaticSectorMap,
};
pub use infrastructure::scenario::{Scenario, ScenarioError, SeededScenario};
