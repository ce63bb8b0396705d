//! Prometheus metrics for signal admission.
//!
//! # Example
//!
//! ```ignore
//! use signal_admission::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config)?;
//!
//! record_admission("admitted", "none", 0.004);
//! ```

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for admission latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // 100us to 5s; repository reads dominate
            latency_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Admission Metrics
// ============================================================================

/// Record one admission decision.
///
/// # Arguments
///
/// * `outcome` - "admitted", "approved" (evaluated only) or "rejected"
/// * `verdict` - "WAIT", "SUSPENDED" or "none"
/// * `duration_seconds` - Wall time including repository reads
pub fn record_admission(outcome: &str, verdict: &str, duration_seconds: f64) {
    counter!(
        "signal_admissions_total",
        "outcome" => outcome.to_string(),
        "verdict" => verdict.to_string()
    )
    .increment(1);

    histogram!(
        "signal_admission_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(duration_seconds);
}

/// Record a circuit breaker trigger.
///
/// # Arguments
///
/// * `trigger` - "drawdown" or "consecutive_loss"
pub fn record_circuit_breaker_trigger(trigger: &str) {
    counter!(
        "circuit_breaker_triggers_total",
        "trigger" => trigger.to_string()
    )
    .increment(1);
}

/// Record a failed or timed-out repository call.
///
/// # Arguments
///
/// * `store` - Store name (e.g., "open_positions")
pub fn record_repository_failure(store: &str) {
    counter!(
        "risk_repository_failures_total",
        "store" => store.to_string()
    )
    .increment(1);
}

/// Update the committed heat gauge for a user after an admission.
pub fn update_portfolio_heat(user: &str, heat: f64) {
    gauge!("portfolio_heat_ratio", "user" => user.to_string()).set(heat);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn test_config_with_addr() {
        let addr: SocketAddr = "127.0.0.1:9100".parse().unwrap();
        let config = MetricsConfig::with_addr(addr);
        assert_eq!(config.listen_addr, addr);
    }

    #[test]
    fn test_latency_buckets_sorted() {
        let config = MetricsConfig::default();
        assert!(config.latency_buckets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_recorders_without_exporter() {
        // No recorder installed; calls must be no-ops
        record_admission("rejected", "WAIT", 0.002);
        record_circuit_breaker_trigger("drawdown");
        record_repository_failure("open_positions");
        update_portfolio_heat("u1", 0.05);
    }
}
