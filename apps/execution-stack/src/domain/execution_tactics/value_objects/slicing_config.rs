//! Slicing planner parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::execution_tactics::errors::TacticError;

/// Configuration for the slicing planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicingConfig {
    /// Maximum TWAP slices regardless of `max_children` (default: 5).
    pub horizon_slices: u32,
    /// Spacing between time-sliced children in milliseconds (default: 1000).
    pub slice_interval_ms: u64,
    /// Maximum relative perturbation of a non-final child (default: 0.15).
    pub jitter_fraction: f64,
    /// Seed for slice perturbation; requests may override it.
    pub seed: Option<u64>,
}

impl Default for SlicingConfig {
    fn default() -> Self {
        Self {
            horizon_slices: 5,
            slice_interval_ms: 1_000,
            jitter_fraction: 0.15,
            seed: None,
        }
    }
}

impl SlicingConfig {
    /// Spacing between time-sliced children.
    #[must_use]
    pub const fn slice_interval(&self) -> Duration {
        Duration::from_millis(self.slice_interval_ms)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), TacticError> {
        if self.horizon_slices == 0 {
            return Err(TacticError::invalid("horizon_slices must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.jitter_fraction) {
            return Err(TacticError::invalid(format!(
                "jitter_fraction must be in [0, 1), got {}",
                self.jitter_fraction
            )));
        }
        Ok(())
    }
}
