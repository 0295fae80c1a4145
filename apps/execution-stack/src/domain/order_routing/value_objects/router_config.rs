//! Router parameters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Spreads above this many basis points route neutral (default: 12).
    pub wide_spread_bps: Decimal,
    /// Venue label stamped on every decision (default: `primary`).
    pub route: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            wide_spread_bps: dec!(12),
            route: "primary".to_string(),
        }
    }
}

impl RouterConfig {
    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        if self.wide_spread_bps <= Decimal::ZERO {
            return Err(format!(
                "wide_spread_bps must be positive, got {}",
                self.wide_spread_bps
            ));
        }
        if self.route.trim().is_empty() {
            return Err("route must not be empty".to_string());
        }
        Ok(())
    }
}
