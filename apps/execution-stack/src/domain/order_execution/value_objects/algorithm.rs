//! Execution algorithm selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Execution algorithm for a parent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    /// Send the full quantity at once.
    Immediate,
    /// Implementation shortfall; treated as an immediate-urgency alias.
    Is,
    /// Equal slices spread over a time horizon.
    Twap,
    /// Volume-weighted slices sized from participation.
    Vwap,
    /// Percentage-of-volume slices sized from participation.
    Pov,
}

impl Algorithm {
    /// Returns true for algorithms that always produce exactly one child.
    #[must_use]
    pub const fn is_single_shot(&self) -> bool {
        matches!(self, Self::Immediate | Self::Is)
    }

    /// Returns true for algorithms whose children are spaced out in time.
    #[must_use]
    pub const fn is_time_sliced(&self) -> bool {
        matches!(self, Self::Twap | Self::Vwap | Self::Pov)
    }

    /// Returns true for algorithms sized from a participation rate.
    #[must_use]
    pub const fn is_participation_based(&self) -> bool {
        matches!(self, Self::Vwap | Self::Pov)
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::Is => "IS",
            Self::Twap => "TWAP",
            Self::Vwap => "VWAP",
            Self::Pov => "POV",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IMMEDIATE" => Ok(Self::Immediate),
            "IS" => Ok(Self::Is),
            "TWAP" => Ok(Self::Twap),
            "VWAP" => Ok(Self::Vwap),
            "POV" => Ok(Self::Pov),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_algorithms() {
        assert_eq!("twap".parse::<Algorithm>(), Ok(Algorithm::Twap));
        assert_eq!(" IS ".parse::<Algorithm>(), Ok(Algorithm::Is));
        assert_eq!("Pov".parse::<Algorithm>(), Ok(Algorithm::Pov));
    }

    #[test]
    fn parse_unknown_algorithm_returns_input() {
        assert_eq!("ICEBERG".parse::<Algorithm>(), Err("ICEBERG".to_string()));
    }

    #[test]
    fn classification() {
        assert!(Algorithm::Immediate.is_single_shot());
        assert!(Algorithm::Is.is_single_shot());
        assert!(Algorithm::Twap.is_time_sliced());
        assert!(!Algorithm::Twap.is_participation_based());
        assert!(Algorithm::Vwap.is_participation_based());
        assert!(Algorithm::Pov.is_time_sliced());
    }
}
