//! Telemetry Port (Driven Port)
//!
//! Append-only sink for per-attempt execution records.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::value_objects::{Algorithm, OrderSide};
use crate::domain::order_routing::QueuePosture;
use crate::domain::retry_policy::ErrorBucket;
use crate::domain::shared::{BrokerOrderId, Symbol, TraceId};

/// Attempt status as written to the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Broker accepted the attempt.
    Placed,
    /// Attempt failed.
    Error,
}

/// One line of the execution quality stream. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// RFC 3339 UTC with millisecond precision.
    #[serde(with = "rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
    /// Parent correlation id.
    pub trace_id: TraceId,
    /// Instrument.
    pub symbol: Symbol,
    /// Side.
    pub side: OrderSide,
    /// Algorithm of the parent.
    pub algorithm: Algorithm,
    /// Child index, 0-based.
    pub child_index: u32,
    /// Number of children in the parent.
    pub children: u32,
    /// Child quantity.
    pub quantity: u64,
    /// Last price at request time.
    pub arrival_price: Decimal,
    /// Effective limit price.
    pub limit_price: Option<Decimal>,
    /// Signed expected slippage.
    pub expected_slippage: Decimal,
    /// Impact score.
    pub impact_estimate: f64,
    /// Queue posture.
    pub queue_posture: QueuePosture,
    /// Venue label.
    pub route: String,
    /// Submission latency.
    pub latency_ms: u64,
    /// Attempt number, from 1.
    pub attempt: u32,
    /// Placed or error.
    pub status: RecordStatus,
    /// Broker order id on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<BrokerOrderId>,
    /// Failure bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bucket: Option<ErrorBucket>,
    /// Failure detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TelemetryRecord {
    /// Returns true if the attempt was placed.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.status == RecordStatus::Placed
    }
}

mod rfc3339_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Formats a timestamp the way records do.
#[must_use]
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Telemetry sink error.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// I/O failure writing or reading the stream.
    #[error("Telemetry I/O error on {path}: {source}")]
    Io {
        /// Stream path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Record could not be serialized.
    #[error("Telemetry serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writer task failed.
    #[error("Telemetry writer task failed: {message}")]
    Task {
        /// Error details.
        message: String,
    },
}

/// Append-only record sink.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Append one record.
    async fn append(&self, record: &TelemetryRecord) -> Result<(), TelemetryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn record() -> TelemetryRecord {
        TelemetryRecord {
            timestamp: Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 0).unwrap(),
            trace_id: TraceId::new("abc"),
            symbol: Symbol::new("INFY"),
            side: OrderSide::Buy,
            algorithm: Algorithm::Twap,
            child_index: 0,
            children: 4,
            quantity: 25,
            arrival_price: dec!(1500.5),
            limit_price: Some(dec!(1500.25)),
            expected_slippage: dec!(0.3712),
            impact_estimate: 0.51,
            queue_posture: QueuePosture::Join,
            route: "primary".to_string(),
            latency_ms: 12,
            attempt: 1,
            status: RecordStatus::Placed,
            order_id: Some(BrokerOrderId::new("ord-1")),
            error_bucket: None,
            error: None,
        }
    }

    #[test]
    fn record_wire_format() {
        let json: serde_json::Value = serde_json::to_value(record()).unwrap();
        assert_eq!(json["timestamp"], "2026-03-02T09:15:00.000Z");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["algorithm"], "TWAP");
        assert_eq!(json["queue_posture"], "join");
        assert_eq!(json["status"], "placed");
        assert_eq!(json["order_id"], "ord-1");
        assert!(json.get("error_bucket").is_none());
    }

    #[test]
    fn error_record_has_bucket() {
        let mut failed = record();
        failed.status = RecordStatus::Error;
        failed.order_id = None;
        failed.error_bucket = Some(ErrorBucket::Throttle);
        failed.error = Some("429 Too Many Requests".to_string());

        let line = serde_json::to_string(&failed).unwrap();
        let parsed: TelemetryRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, failed);
        assert!(!parsed.is_placed());
    }
}
