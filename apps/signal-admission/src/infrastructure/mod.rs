//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - `persistence/`: in-memory stores, static sector map, returns provider
//! - `scenario`: JSON fixtures that seed the in-memory adapters

pub mod persistence;
pub mod scenario;
