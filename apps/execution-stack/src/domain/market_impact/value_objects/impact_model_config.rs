//! Proxy impact model parameters.

use serde::{Deserialize, Serialize};

/// Parameters of the proxy impact model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactModelConfig {
    /// Price fraction charged per unit of impact score (default: 0.0004).
    pub coefficient: f64,
    /// Concavity of impact in the size ratio (default: 0.6).
    pub exponent: f64,
    /// Floor on the size ratio (default: 0.01).
    pub min_ratio: f64,
    /// Spread assumed as a fraction of last price when the book has no
    /// two-sided quote (default: 0.001).
    pub fallback_spread_fraction: f64,
}

impl Default for ImpactModelConfig {
    fn default() -> Self {
        Self {
            coefficient: 0.0004,
            exponent: 0.6,
            min_ratio: 0.01,
            fallback_spread_fraction: 0.001,
        }
    }
}

impl ImpactModelConfig {
    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        if !self.coefficient.is_finite() || self.coefficient < 0.0 {
            return Err(format!("coefficient must be >= 0, got {}", self.coefficient));
        }
        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            return Err(format!("exponent must be > 0, got {}", self.exponent));
        }
        if !(self.min_ratio > 0.0 && self.min_ratio <= 1.0) {
            return Err(format!("min_ratio must be in (0, 1], got {}", self.min_ratio));
        }
        if !self.fallback_spread_fraction.is_finite() || self.fallback_spread_fraction < 0.0 {
            return Err(format!(
                "fallback_spread_fraction must be >= 0, got {}",
                self.fallback_spread_fraction
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ImpactModelConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_ratio() {
        let config = ImpactModelConfig {
            min_ratio: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
