//! Orchestrator timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Deadline for a single submission attempt in milliseconds.
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            attempt_timeout_ms: default_attempt_timeout_ms(),
        }
    }
}

impl ExecutionConfig {
    /// Attempt deadline.
    #[must_use]
    pub const fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

const fn default_attempt_timeout_ms() -> u64 {
    5_000
}
