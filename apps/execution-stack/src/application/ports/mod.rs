//! Application Ports (Driven)
//!
//! Interfaces to the systems the engine depends on: the order gateway, the
//! market-data feed and the telemetry stream.

mod broker_port;
mod market_data_port;
mod telemetry_port;

pub use broker_port::{BrokerOrderStatus, BrokerPort, GatewayError, OrderAck, SubmitOrderRequest};
pub use market_data_port::{BookSnapshot, MarketDataError, MarketDataPort};
pub use telemetry_port::{
    RecordStatus, TelemetryError, TelemetryRecord, TelemetrySink, format_timestamp,
};
