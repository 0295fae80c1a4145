//! Environment configuration for trading mode.

use serde::{Deserialize, Serialize};

use crate::domain::shared::TradingMode;

/// Environment configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Trading mode; selects the telemetry stream.
    #[serde(default)]
    pub mode: TradingMode,
}
