//! Configuration module for signal admission.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the admission pipeline.
//!
//! # Usage
//!
//! ```rust,ignore
//! use signal_admission::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("read timeout: {}ms", config.repository.read_timeout_ms);
//! ```

mod circuit_breaker;
mod correlation;
mod observability;
mod repository;
mod risk;
mod sectors;
mod sizing;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use circuit_breaker::CircuitBreakerConfig;
pub use correlation::CorrelationConfig;
pub use observability::{LogFormat, LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use repository::RepositoryConfig;
pub use risk::RiskConfig;
pub use sectors::SectorsConfig;
pub use sizing::SizingConfig;

use crate::application::use_cases::AdmissionOptions;
use crate::domain::risk_management::constants::{MAX_PORTFOLIO_HEAT_CEILING, MAX_RISK_PER_TRADE};
use crate::domain::shared::Symbol;
use crate::domain::risk_management::{PositionSizer, RiskSettings, SectorDiversificationGuard};

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "SIGNAL_ADMISSION_CONFIG";

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default per-user limits.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Sizing rules.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Correlation guard.
    #[serde(default)]
    pub correlation: CorrelationConfig,
    /// Circuit breaker.
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
    /// Sector classification.
    #[serde(default)]
    pub sectors: SectorsConfig,
    /// Store access.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Rule settings for the validator.
    #[must_use]
    pub fn risk_settings(&self) -> RiskSettings {
        RiskSettings {
            sizer: PositionSizer::new(
                self.sizing.lot_size,
                self.sizing.wide_stop_warning,
                self.sizing.max_risk_per_trade,
            ),
            breaker: self.circuit_breaker.breaker(),
            sector_guard: SectorDiversificationGuard::new(
                self.sectors.unclassified.iter().cloned(),
            ),
            correlation_lookback: self.correlation.lookback_days,
            correlation_cap_factor: self.correlation.cap_factor,
            on_new_trigger: self.circuit_breaker.on_new_trigger,
        }
    }

    /// Timeouts and lookup fallbacks for the admission use case.
    #[must_use]
    pub fn admission_options(&self) -> AdmissionOptions {
        AdmissionOptions {
            read_timeout: self.repository.read_timeout(),
            benchmark: Symbol::new(&self.correlation.benchmark),
            fallback_sector: self.sectors.fallback(),
        }
    }
}

pub(crate) const fn default_true() -> bool {
    true
}

// ============================================
// Configuration Loading
// ============================================

/// Config path from `SIGNAL_ADMISSION_CONFIG`, falling back to `config.yaml`.
#[must_use]
pub fn config_path_from_env() -> String {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// An empty document yields the defaults.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

fn fraction_in(value: Decimal, field: &str, allow_zero: bool) -> Result<(), ConfigError> {
    let lower_ok = if allow_zero {
        value >= Decimal::ZERO
    } else {
        value > Decimal::ZERO
    };
    if !lower_ok || value > Decimal::ONE {
        let open = if allow_zero { "[" } else { "(" };
        return Err(ConfigError::ValidationError(format!(
            "{field} must be in {open}0, 1]"
        )));
    }
    Ok(())
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let sizing = &config.sizing;
    fraction_in(sizing.max_risk_per_trade, "sizing.max_risk_per_trade", false)?;
    if sizing.max_risk_per_trade > MAX_RISK_PER_TRADE {
        return Err(ConfigError::ValidationError(
            "sizing.max_risk_per_trade must not exceed 0.05".to_string(),
        ));
    }
    if sizing.lot_size == 0 {
        return Err(ConfigError::ValidationError(
            "sizing.lot_size must be at least 1".to_string(),
        ));
    }
    fraction_in(sizing.wide_stop_warning, "sizing.wide_stop_warning", false)?;

    let risk = &config.risk;
    if risk.risk_per_trade <= Decimal::ZERO || risk.risk_per_trade > sizing.max_risk_per_trade {
        return Err(ConfigError::ValidationError(
            "risk.risk_per_trade must be in (0, sizing.max_risk_per_trade]".to_string(),
        ));
    }
    if risk.max_heat < Decimal::ZERO || risk.max_heat > MAX_PORTFOLIO_HEAT_CEILING {
        return Err(ConfigError::ValidationError(
            "risk.max_heat must be in [0, 0.5]".to_string(),
        ));
    }
    if risk.heat_warning < Decimal::ZERO || risk.heat_warning > risk.max_heat {
        return Err(ConfigError::ValidationError(
            "risk.heat_warning must be between 0 and risk.max_heat".to_string(),
        ));
    }
    fraction_in(risk.max_exposure_pct, "risk.max_exposure_pct", false)?;
    fraction_in(
        risk.max_small_cap_exposure_pct,
        "risk.max_small_cap_exposure_pct",
        false,
    )?;
    fraction_in(risk.cash_reserve_target, "risk.cash_reserve_target", true)?;
    if risk.max_positions_per_sector == 0 {
        return Err(ConfigError::ValidationError(
            "risk.max_positions_per_sector must be at least 1".to_string(),
        ));
    }
    if !(risk.correlation_threshold > 0.0 && risk.correlation_threshold <= 1.0) {
        return Err(ConfigError::ValidationError(
            "risk.correlation_threshold must be in (0, 1]".to_string(),
        ));
    }

    if config.correlation.lookback_days < 2 {
        return Err(ConfigError::ValidationError(
            "correlation.lookback_days must be at least 2".to_string(),
        ));
    }
    fraction_in(config.correlation.cap_factor, "correlation.cap_factor", false)?;
    if config.correlation.benchmark.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "correlation.benchmark must not be empty".to_string(),
        ));
    }

    let cb = &config.circuit_breaker;
    fraction_in(cb.drawdown_trigger, "circuit_breaker.drawdown_trigger", false)?;
    if cb.consecutive_loss_trigger == 0 {
        return Err(ConfigError::ValidationError(
            "circuit_breaker.consecutive_loss_trigger must be at least 1".to_string(),
        ));
    }
    if cb.drawdown_suspend_days < 1 || cb.loss_suspend_days < 1 {
        return Err(ConfigError::ValidationError(
            "circuit_breaker suspension days must be at least 1".to_string(),
        ));
    }
    if cb.reduced_risk <= Decimal::ZERO || cb.reduced_risk > sizing.max_risk_per_trade {
        return Err(ConfigError::ValidationError(
            "circuit_breaker.reduced_risk must be in (0, sizing.max_risk_per_trade]".to_string(),
        ));
    }

    if config.repository.read_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "repository.read_timeout_ms must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::portfolio::MarketCapCategory;
    use crate::domain::risk_management::NewTriggerPolicy;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = match load_config_from_string("") {
            Ok(c) => c,
            Err(e) => panic!("empty config should load: {e}"),
        };
        assert_eq!(config.risk.risk_per_trade, dec!(0.01));
        assert_eq!(config.risk.max_heat, dec!(0.08));
        assert_eq!(config.sizing.lot_size, 100);
        assert_eq!(config.correlation.lookback_days, 90);
        assert_eq!(config.correlation.benchmark, "IHSG");
        assert_eq!(config.circuit_breaker.on_new_trigger, NewTriggerPolicy::HardBlock);
        assert_eq!(config.sectors.unclassified, vec!["Other".to_string()]);
        assert_eq!(config.repository.read_timeout_ms, 2000);
        assert_eq!(config.observability.logging.format, LogFormat::Json);
        assert!(!config.observability.metrics.enabled);
    }

    #[test]
    fn test_admission_options_from_config() {
        let yaml = "repository:\n  read_timeout_ms: 500\ncorrelation:\n  benchmark: lq45\n";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("config should load: {e}"),
        };
        let options = config.admission_options();
        assert_eq!(options.read_timeout, std::time::Duration::from_millis(500));
        assert_eq!(options.benchmark.as_str(), "LQ45");
        assert_eq!(options.fallback_sector.sector, "Other");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "level: ${SIGNAL_ADMISSION_TEST_NONEXISTENT_VAR:-debug}";
        assert_eq!(interpolate_env_vars(input), "level: debug");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "benchmark: ${SIGNAL_ADMISSION_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "benchmark: ");
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
risk:
  risk_per_trade: 0.015
  max_heat: 0.10
  heat_warning: 0.07
  max_positions_per_sector: 3

sizing:
  lot_size: 100
  wide_stop_warning: 0.2

correlation:
  lookback_days: 60
  cap_factor: 0.5
  benchmark: "LQ45"

circuit_breaker:
  drawdown_trigger: 0.08
  consecutive_loss_trigger: 4
  on_new_trigger: reduce_risk

sectors:
  unclassified: ["Other", "Unknown"]
  default_market_cap: mid
  map:
    BBCA: { sector: Banking, market_cap: large }
    GOTO: { sector: Technology, market_cap: small }

repository:
  read_timeout_ms: 500

observability:
  logging:
    level: "debug"
    format: "pretty"
"#;
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };
        assert_eq!(config.risk.risk_per_trade, dec!(0.015));
        assert_eq!(config.risk.max_positions_per_sector, 3);
        assert_eq!(config.correlation.lookback_days, 60);
        assert_eq!(config.correlation.benchmark, "LQ45");
        assert_eq!(config.circuit_breaker.consecutive_loss_trigger, 4);
        assert_eq!(config.circuit_breaker.on_new_trigger, NewTriggerPolicy::ReduceRisk);
        assert_eq!(config.sectors.default_market_cap, MarketCapCategory::Mid);
        assert_eq!(config.sectors.map["BBCA"].sector, "Banking");
        assert_eq!(config.repository.read_timeout_ms, 500);
        assert_eq!(config.observability.logging.format, LogFormat::Pretty);

        let settings = config.risk_settings();
        assert!(settings.sector_guard.is_exempt("Unknown"));
        assert_eq!(settings.correlation_lookback, 60);
    }

    #[test]
    fn test_validation_risk_above_ceiling() {
        let result = load_config_from_string("risk:\n  risk_per_trade: 0.06\n");
        let Err(err) = result else {
            panic!("expected error for risk above ceiling");
        };
        assert!(err.to_string().contains("risk_per_trade"));
    }

    #[test]
    fn test_validation_warning_above_limit() {
        let result = load_config_from_string("risk:\n  max_heat: 0.05\n  heat_warning: 0.06\n");
        let Err(err) = result else {
            panic!("expected error for warning above limit");
        };
        assert!(err.to_string().contains("heat_warning"));
    }

    #[test]
    fn test_validation_heat_ceiling() {
        let result = load_config_from_string("risk:\n  max_heat: 0.6\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_lot_size() {
        let result = load_config_from_string("sizing:\n  lot_size: 0\n");
        let Err(err) = result else {
            panic!("expected error for zero lot size");
        };
        assert!(err.to_string().contains("lot_size"));
    }

    #[test]
    fn test_validation_zero_suspension_days() {
        let result = load_config_from_string("circuit_breaker:\n  loss_suspend_days: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let result = load_config_from_string("repository:\n  read_timeout_ms: 0\n");
        let Err(err) = result else {
            panic!("expected error for zero timeout");
        };
        assert!(err.to_string().contains("read_timeout_ms"));
    }

    #[test]
    fn test_parse_error_reported() {
        let result = load_config_from_string("risk: [not, a, map]");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_reported() {
        let result = load_config(Some("/nonexistent/signal-admission.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_portfolio_seeding_uses_risk_section() {
        let config = load_config_from_string("risk:\n  max_heat: 0.1\n").unwrap();
        let portfolio = config
            .risk
            .portfolio_for(crate::domain::shared::UserId::new("u1"), dec!(50_000_000));
        assert_eq!(portfolio.max_heat, dec!(0.1));
        assert!(portfolio.validate().is_ok());
    }
}
