//! Application Services
//!
//! Post-trade analysis over the telemetry stream. Unlike use cases these do
//! not drive the broker.

mod tca_report;

pub use tca_report::TcaReport;
