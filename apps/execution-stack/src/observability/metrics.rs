//! Prometheus metrics for the execution stack.
//!
//! Recording functions are cheap no-ops until an exporter is installed, so
//! the orchestrator records unconditionally.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `execution_attempts_total` | counter | `status`, `bucket` |
//! | `execution_attempt_latency_seconds` | histogram | `status` |
//! | `execution_expected_slippage` | histogram | `side` |
//! | `execution_retries_total` | counter | `bucket` |
//! | `execution_results_total` | counter | `status` |
//! | `execution_filled_quantity_total` | counter | |
//! | `execution_telemetry_failures_total` | counter | |

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            // 1ms to 10s
            latency_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Execution Metrics
// ============================================================================

/// Record one submission attempt.
///
/// # Arguments
///
/// * `status` - `placed` or `error`
/// * `bucket` - Failure bucket, or `none` for placed attempts
/// * `latency_seconds` - Submission round-trip in seconds
pub fn record_attempt(status: &'static str, bucket: &'static str, latency_seconds: f64) {
    counter!(
        "execution_attempts_total",
        "status" => status,
        "bucket" => bucket
    )
    .increment(1);

    histogram!("execution_attempt_latency_seconds", "status" => status).record(latency_seconds);
}

/// Record the pre-trade slippage estimate of a child.
pub fn record_expected_slippage(side: &'static str, slippage: f64) {
    histogram!("execution_expected_slippage", "side" => side).record(slippage);
}

/// Record a scheduled retry.
pub fn record_retry(bucket: &'static str) {
    counter!("execution_retries_total", "bucket" => bucket).increment(1);
}

/// Record a finished parent execution.
pub fn record_execution_result(status: &'static str, filled_quantity: u64) {
    counter!("execution_results_total", "status" => status).increment(1);
    counter!("execution_filled_quantity_total").increment(filled_quantity);
}

/// Record a telemetry write failure.
pub fn record_telemetry_failure() {
    counter!("execution_telemetry_failures_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_exporter_is_noop() {
        record_attempt("placed", "none", 0.012);
        record_expected_slippage("BUY", 0.05);
        record_retry("throttle");
        record_execution_result("complete", 100);
        record_telemetry_failure();
    }

    #[test]
    fn config_with_addr() {
        let addr: SocketAddr = "127.0.0.1:9100".parse().unwrap();
        let config = MetricsConfig::with_addr(addr);
        assert_eq!(config.listen_addr, addr);
        assert!(!config.latency_buckets.is_empty());
    }
}
