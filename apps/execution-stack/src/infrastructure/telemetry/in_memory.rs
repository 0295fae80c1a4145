//! In-memory telemetry sink for testing.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{TelemetryError, TelemetryRecord, TelemetrySink};

/// Collects records in memory. Can be switched into a failing mode to
/// exercise telemetry-failure handling.
#[derive(Debug, Default)]
pub struct InMemoryTelemetrySink {
    records: Mutex<Vec<TelemetryRecord>>,
    failing: AtomicBool,
}

impl InMemoryTelemetrySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose appends always fail.
    #[must_use]
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    /// Toggle failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of recorded entries, in append order.
    #[must_use]
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TelemetrySink for InMemoryTelemetrySink {
    async fn append(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TelemetryError::Io {
                path: "memory".to_string(),
                source: io::Error::other("sink unavailable"),
            });
        }
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}
