//! One shared recorder per trading mode.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::ports::TelemetryError;
use crate::config::TelemetryConfig;
use crate::domain::shared::TradingMode;

use super::JsonlTelemetryRecorder;

/// Hands out the process-wide recorder for each mode, opening it on first
/// use. Two handles for the same mode share one file and one mutex.
#[derive(Debug)]
pub struct TelemetryRegistry {
    base_dir: PathBuf,
    fsync: bool,
    recorders: Mutex<HashMap<TradingMode, Arc<JsonlTelemetryRecorder>>>,
}

impl TelemetryRegistry {
    /// Create a registry from configuration.
    #[must_use]
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            fsync: config.fsync,
            recorders: Mutex::new(HashMap::new()),
        }
    }

    /// Recorder for `mode`.
    ///
    /// # Errors
    ///
    /// Returns the open error the first time a mode's stream cannot be opened.
    pub fn recorder(
        &self,
        mode: TradingMode,
    ) -> Result<Arc<JsonlTelemetryRecorder>, TelemetryError> {
        let mut recorders = self.recorders.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = recorders.get(&mode) {
            return Ok(Arc::clone(existing));
        }
        let recorder = Arc::new(JsonlTelemetryRecorder::open(&self.base_dir, mode, self.fsync)?);
        recorders.insert(mode, Arc::clone(&recorder));
        Ok(recorder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(dir: &tempfile::TempDir) -> TelemetryRegistry {
        TelemetryRegistry::new(&TelemetryConfig {
            base_dir: dir.path().to_path_buf(),
            fsync: false,
        })
    }

    #[test]
    fn same_mode_shares_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);

        let a = registry.recorder(TradingMode::Paper).unwrap();
        let b = registry.recorder(TradingMode::Paper).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn modes_never_share_a_stream() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);

        let paper = registry.recorder(TradingMode::Paper).unwrap();
        let live = registry.recorder(TradingMode::Live).unwrap();
        assert_ne!(paper.path(), live.path());
        assert_eq!(live.mode(), TradingMode::Live);
    }
}
