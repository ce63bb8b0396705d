//! JSON scenario fixtures.
//!
//! A scenario describes one or more portfolios, the market data the risk gate
//! reads, and the candidate signals to admit. Seeding it produces in-memory
//! ports wired for [`AdmitSignalUseCase`](crate::application::AdmitSignalUseCase).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::dto::AdmissionRequest;
use crate::application::ports::{Clock, FixedClock, SystemClock};
use crate::application::use_cases::AdmissionPorts;
use crate::config::Config;
use crate::domain::portfolio::{
    CandidateSignal, ClosedTrade, OpenPosition, PortfolioConfig, SectorInfo,
};
use crate::domain::risk_management::CircuitBreakerEvent;
use crate::domain::shared::UserId;
use crate::infrastructure::persistence::{
    InMemoryPortfolioStore, InMemoryReturnsProvider, StaticSectorMap,
};

/// Scenario loading errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read the scenario file.
    #[error("Failed to read scenario '{path}': {source}")]
    Read {
        /// Path to the scenario file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse scenario JSON.
    #[error("Failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A complete admission run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Evaluation time; wall clock when absent.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    /// Sector entries added on top of the configured map.
    #[serde(default)]
    pub sectors: BTreeMap<String, SectorInfo>,
    /// Daily returns per symbol, oldest first.
    #[serde(default)]
    pub returns: BTreeMap<String, Vec<f64>>,
    /// Portfolios and their candidates.
    pub portfolios: Vec<ScenarioPortfolio>,
}

/// One user's state and candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPortfolio {
    /// Portfolio owner.
    pub user: UserId,
    /// Total capital; limits come from the `risk` config section.
    #[serde(default)]
    pub capital: Option<Decimal>,
    /// Explicit limits, overriding `capital` and the config defaults.
    #[serde(default)]
    pub config: Option<PortfolioConfig>,
    /// Open positions.
    #[serde(default)]
    pub positions: Vec<OpenPosition>,
    /// Closed trade history.
    #[serde(default)]
    pub closed_trades: Vec<ClosedTrade>,
    /// Existing suspension records.
    #[serde(default)]
    pub suspensions: Vec<CircuitBreakerEvent>,
    /// Signals to admit, in order.
    #[serde(default)]
    pub candidates: Vec<CandidateSignal>,
}

/// Ports and requests built from a scenario.
pub struct SeededScenario {
    /// Ports for the use case.
    pub ports: AdmissionPorts,
    /// Backing store, for inspecting commits afterwards.
    pub store: Arc<InMemoryPortfolioStore>,
    /// Admission requests in scenario order.
    pub requests: Vec<AdmissionRequest>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build in-memory stores holding the scenario state.
    ///
    /// A portfolio with neither `config` nor `capital` gets no configuration,
    /// so its candidates are rejected as unconfigured.
    #[must_use]
    pub fn seed(&self, config: &Config) -> SeededScenario {
        let store = Arc::new(InMemoryPortfolioStore::new());
        let mut requests = Vec::new();

        for portfolio in &self.portfolios {
            let user = &portfolio.user;
            let limits = portfolio.config.clone().or_else(|| {
                portfolio
                    .capital
                    .map(|capital| config.risk.portfolio_for(user.clone(), capital))
            });
            if let Some(limits) = limits {
                store.put_config(limits);
            }
            store.put_positions(user, portfolio.positions.clone());
            for trade in &portfolio.closed_trades {
                store.add_trade(user, trade.clone());
            }
            for event in &portfolio.suspensions {
                store.put_breaker_event(event.clone());
            }
            requests.extend(
                portfolio
                    .candidates
                    .iter()
                    .map(|c| AdmissionRequest::new(user.clone(), c.clone())),
            );
        }

        let sectors = StaticSectorMap::new(
            config
                .sectors
                .map
                .iter()
                .chain(&self.sectors)
                .map(|(symbol, info)| (symbol.as_str(), info.clone())),
        );

        let returns = InMemoryReturnsProvider::new();
        for (symbol, series) in &self.returns {
            returns.put(symbol.as_str(), series.clone());
        }

        let clock: Arc<dyn Clock> = match self.now {
            Some(now) => Arc::new(FixedClock(now)),
            None => Arc::new(SystemClock),
        };

        let ports = AdmissionPorts {
            configs: store.clone(),
            positions: store.clone(),
            trades: store.clone(),
            breakers: store.clone(),
            sectors: Arc::new(sectors),
            returns: Arc::new(returns),
            clock,
        };

        SeededScenario {
            ports,
            store,
            requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PortfolioConfigStore;
    use rust_decimal_macros::dec;

    const SCENARIO: &str = r#"{
        "now": "2026-03-20T10:00:00Z",
        "sectors": { "ASII": { "sector": "Automotive", "market_cap": "large" } },
        "returns": { "ASII": [0.01, -0.02, 0.005] },
        "portfolios": [
            {
                "user": "u1",
                "capital": "1000000000",
                "positions": [
                    { "symbol": "BBCA", "risk_fraction": "0.02", "quantity": 1000, "entry_price": "9000" }
                ],
                "candidates": [
                    { "symbol": "ASII", "entry_price": "7200", "stop_price": "6800" }
                ]
            },
            { "user": "u2", "candidates": [ { "symbol": "TLKM", "entry_price": "3000", "stop_price": "2800" } ] }
        ]
    }"#;

    #[test]
    fn parses_and_seeds() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let seeded = scenario.seed(&Config::default());

        assert_eq!(seeded.requests.len(), 2);
        assert_eq!(seeded.requests[0].user.as_str(), "u1");
        assert_eq!(seeded.store.positions(&UserId::new("u1")).len(), 1);
        assert_eq!(seeded.ports.clock.now(), scenario.now.unwrap());
    }

    #[tokio::test]
    async fn capital_uses_configured_limits() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let seeded = scenario.seed(&Config::default());

        let u1 = seeded.ports.configs.get(&UserId::new("u1")).await.unwrap().unwrap();
        assert_eq!(u1.total_capital, dec!(1_000_000_000));
        assert_eq!(u1.risk_per_trade, dec!(0.01));
        assert!(seeded.ports.configs.get(&UserId::new("u2")).await.unwrap().is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Scenario::from_json("{ \"portfolios\": 3 }"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Scenario::load("/nonexistent/scenario.json").unwrap_err();
        assert!(matches!(err, ScenarioError::Read { .. }));
    }
}
