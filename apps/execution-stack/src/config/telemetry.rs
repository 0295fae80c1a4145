//! Telemetry stream configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Directory holding `execution_quality_<mode>.jsonl`.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// Call `sync_data` after every record.
    #[serde(default)]
    pub fsync: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            fsync: false,
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("data")
}
