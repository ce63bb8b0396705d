//! Tracing Setup
//!
//! Initializes the `tracing` subscriber from the logging configuration.
//!
//! # Configuration
//!
//! - `observability.logging.level`: default filter (e.g. `info`, `signal_admission=debug`)
//! - `observability.logging.format`: `json` or `pretty`
//! - `RUST_LOG`: overrides the configured level when set
//!
//! # Usage
//!
//! ```rust,ignore
//! use signal_admission::telemetry::init_telemetry;
//!
//! init_telemetry(&config.observability.logging)?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::{LogFormat, LoggingConfig};

/// Failure installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level '{level}': {message}")]
    InvalidLevel {
        /// Configured level.
        level: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Build the filter: `RUST_LOG` if set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidLevel {
        level: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global tracing subscriber.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_span_events(span_events)
            .with_current_span(config.include_spans)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_span_events(span_events)
            .try_init(),
    };
    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "signal_admission=verbose".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            env_filter(&config),
            Err(TelemetryError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn accepts_default_level() {
        assert!(env_filter(&LoggingConfig::default()).is_ok());
    }
}
