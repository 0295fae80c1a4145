//! Pre-trade impact estimate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expected cost of one child order, computed before its first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Signed price delta versus arrival: positive for buys, negative for sells.
    pub expected_slippage: Decimal,
    /// Unitless impact score.
    pub impact_score: f64,
}

impl ImpactEstimate {
    /// Create a new estimate.
    #[must_use]
    pub const fn new(expected_slippage: Decimal, impact_score: f64) -> Self {
        Self {
            expected_slippage,
            impact_score,
        }
    }

    /// Absolute slippage regardless of side.
    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.expected_slippage.abs()
    }
}
