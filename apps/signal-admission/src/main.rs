//! Signal Admission Binary
//!
//! Runs a JSON scenario through the risk gate and prints the decisions.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin signal-admission -- scenario.json
//! ```
//!
//! # Environment Variables
//!
//! - `SIGNAL_ADMISSION_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::path::Path;

use anyhow::{Context, bail};
use signal_admission::application::use_cases::AdmitSignalUseCase;
use signal_admission::config::{Config, config_path_from_env, load_config};
use signal_admission::domain::risk_management::RiskValidator;
use signal_admission::infrastructure::scenario::Scenario;
use signal_admission::observability::{MetricsConfig, init_metrics};
use signal_admission::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let Some(scenario_path) = std::env::args().nth(1) else {
        bail!("usage: signal-admission <scenario.json>");
    };

    let config = load_app_config()?;
    init_telemetry(&config.observability.logging).context("failed to initialise logging")?;

    if config.observability.metrics.enabled {
        let metrics = MetricsConfig::with_addr(config.observability.metrics.listen_addr);
        init_metrics(&metrics).context("failed to start metrics exporter")?;
    }

    let scenario = Scenario::load(&scenario_path)
        .with_context(|| format!("failed to load scenario {scenario_path}"))?;
    let seeded = scenario.seed(&config);

    tracing::info!(
        scenario = %scenario_path,
        portfolios = scenario.portfolios.len(),
        candidates = seeded.requests.len(),
        "Admitting scenario candidates"
    );

    let use_case = AdmitSignalUseCase::new(
        RiskValidator::new(config.risk_settings()),
        seeded.ports,
        config.admission_options(),
    );
    let decisions = use_case.admit_all(seeded.requests).await?;

    let admitted = decisions.iter().filter(|d| d.committed).count();
    tracing::info!(
        admitted,
        rejected = decisions.len() - admitted,
        "Scenario complete"
    );

    println!("{}", serde_json::to_string_pretty(&decisions)?);
    Ok(())
}

/// Load the config file, falling back to defaults when the default path is absent.
fn load_app_config() -> anyhow::Result<Config> {
    let path = config_path_from_env();
    if !Path::new(&path).exists() && std::env::var_os(signal_admission::config::CONFIG_PATH_ENV).is_none() {
        return Ok(Config::default());
    }
    load_config(Some(&path)).with_context(|| format!("failed to load config {path}"))
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
