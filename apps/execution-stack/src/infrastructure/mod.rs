//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer:
//!
//! - `broker/`: paper broker
//! - `market_data/`: static book snapshots
//! - `telemetry/`: JSON Lines recorder, per-mode registry, in-memory sink

pub mod broker;
pub mod market_data;
pub mod telemetry;
