//! Persistence adapters.
//!
//! In-memory implementations of every driven port, used by tests and the
//! scenario runner.

mod in_memory;
mod returns;
mod sector_map;

pub use in_memory::InMemoryPortfolioStore;
pub use returns::InMemoryReturnsProvider;
pub use sector_map::StaticSectorMap;
