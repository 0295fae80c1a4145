//! Post-trade transaction cost analysis.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::ports::{TelemetryRecord, format_timestamp};
use crate::domain::retry_policy::ErrorBucket;

/// Summary of one telemetry stream.
///
/// Latency and slippage averages are taken over placed attempts only; the
/// reject rate is errors over all attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TcaReport {
    /// RFC 3339 generation time.
    pub generated_at: String,
    /// Distinct parent requests seen.
    pub parents: usize,
    /// Placed attempts.
    pub orders_placed: usize,
    /// Failed attempts.
    pub orders_rejected: usize,
    /// `orders_rejected / attempts × 100`, 2 dp.
    pub reject_rate_pct: f64,
    /// Mean placed latency, 4 dp.
    pub avg_latency_ms: f64,
    /// Mean signed expected slippage of placed attempts, 4 dp.
    pub avg_expected_slippage: Decimal,
    /// Failed attempts per bucket.
    pub errors_by_bucket: BTreeMap<ErrorBucket, usize>,
}

impl TcaReport {
    /// Build a report from records.
    #[must_use]
    pub fn from_records(records: &[TelemetryRecord]) -> Self {
        Self::from_records_at(records, Utc::now())
    }

    /// Build a report stamped with `generated_at`.
    #[must_use]
    pub fn from_records_at(records: &[TelemetryRecord], generated_at: DateTime<Utc>) -> Self {
        let (placed, rejected): (Vec<_>, Vec<_>) = records.iter().partition(|r| r.is_placed());

        let mut errors_by_bucket = BTreeMap::new();
        for record in &rejected {
            let bucket = record.error_bucket.unwrap_or(ErrorBucket::Fatal);
            *errors_by_bucket.entry(bucket).or_insert(0) += 1;
        }

        let mut parents: Vec<_> = records.iter().map(|r| r.trace_id.as_str()).collect();
        parents.sort_unstable();
        parents.dedup();

        let (avg_latency_ms, avg_expected_slippage) = if placed.is_empty() {
            (0.0, Decimal::ZERO)
        } else {
            let count = placed.len();
            let latency: u64 = placed.iter().map(|r| r.latency_ms).sum();
            let slippage: Decimal = placed.iter().map(|r| r.expected_slippage).sum();
            (
                round(latency as f64 / count as f64, 4),
                (slippage / Decimal::from(count)).round_dp(4),
            )
        };

        let reject_rate_pct = if records.is_empty() {
            0.0
        } else {
            round(rejected.len() as f64 / records.len() as f64 * 100.0, 2)
        };

        Self {
            generated_at: format_timestamp(&generated_at),
            parents: parents.len(),
            orders_placed: placed.len(),
            orders_rejected: rejected.len(),
            reject_rate_pct,
            avg_latency_ms,
            avg_expected_slippage,
            errors_by_bucket,
        }
    }
}

fn round(value: f64, dp: i32) -> f64 {
    let factor = 10_f64.powi(dp);
    (value * factor).round() / factor
}

impl fmt::Display for TcaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TCA report ({})", self.generated_at)?;
        writeln!(f, "  parents:              {}", self.parents)?;
        writeln!(f, "  orders placed:        {}", self.orders_placed)?;
        writeln!(f, "  orders rejected:      {}", self.orders_rejected)?;
        writeln!(f, "  reject rate:          {:.2}%", self.reject_rate_pct)?;
        writeln!(f, "  avg latency:          {:.4} ms", self.avg_latency_ms)?;
        write!(f, "  avg expected slippage: {}", self.avg_expected_slippage)?;
        for (bucket, count) in &self.errors_by_bucket {
            write!(f, "\n  errors[{bucket}]: {count}")?;
        }
        Ok(())
    }
}
