//! Trading mode (paper or live).

use serde::{Deserialize, Serialize};

/// Trading mode. Each mode owns its own telemetry stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingMode {
    /// Paper trading - simulated orders with live data.
    #[default]
    #[serde(alias = "paper")]
    Paper,
    /// Live trading - real orders with real money.
    #[serde(alias = "live")]
    Live,
}

impl TradingMode {
    /// Returns true if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Key used to name the mode's telemetry stream.
    #[must_use]
    pub const fn stream_key(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

impl std::fmt::Display for TradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "PAPER"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

impl std::str::FromStr for TradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PAPER" => Ok(Self::Paper),
            "LIVE" => Ok(Self::Live),
            _ => Err(format!("Invalid trading mode: {s}. Must be PAPER or LIVE.")),
        }
    }
}
