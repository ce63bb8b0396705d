//! Portfolio Bounded Context
//!
//! Inputs the risk gate reads but never mutates: the user's portfolio
//! configuration, open positions, closed trade history, sector data, and the
//! candidate signal under evaluation.

mod config;
mod position;
mod sector;
mod signal;
mod trade;

pub use config::PortfolioConfig;
pub use position::OpenPosition;
pub use sector::{MarketCapCategory, SectorInfo};
pub use signal::CandidateSignal;
pub use trade::ClosedTrade;
