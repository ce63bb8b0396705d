//! Observability module for metrics.
//!
//! Prometheus export of admission outcomes, breaker triggers and repository
//! failures. Logging setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_admission, record_circuit_breaker_trigger,
    record_repository_failure, update_portfolio_heat,
};
