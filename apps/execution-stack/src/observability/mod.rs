//! Observability module for metrics and logging.

mod logging;
mod metrics;

pub use logging::init_logging;
pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_attempt, record_execution_result,
    record_expected_slippage, record_retry, record_telemetry_failure,
};
