//! Per-bucket retry parameters.
//!
//! Exponential and fixed backoff are the same primitive: a fixed schedule is
//! an exponential one with a multiplier of 1.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Retry parameters for one retryable bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketPolicy {
    /// Total attempts including the first (default: 3).
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Growth factor applied per further attempt.
    pub backoff_multiplier: f64,
    /// Upper bound on the un-jittered delay, in milliseconds.
    pub max_backoff_ms: u64,
    /// Symmetric jitter as a fraction of the delay (0.2 = ±20%).
    pub jitter_factor: f64,
}

impl BucketPolicy {
    /// Exponential schedule for transient failures: 200ms, ×2, capped at 1s, ±20%.
    #[must_use]
    pub const fn transient() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 200,
            backoff_multiplier: 2.0,
            max_backoff_ms: 1_000,
            jitter_factor: 0.2,
        }
    }

    /// Near-fixed schedule for throttling: one 1s rate window, ±10%.
    #[must_use]
    pub const fn throttle() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 1_000,
            backoff_multiplier: 1.0,
            max_backoff_ms: 1_000,
            jitter_factor: 0.1,
        }
    }

    /// Single attempt, no backoff.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            backoff_multiplier: 1.0,
            max_backoff_ms: 0,
            jitter_factor: 0.0,
        }
    }

    /// Un-jittered delay after failed attempt `attempt` (1-based).
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(63) as i32;
        let scaled = self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(exponent);
        let capped = if scaled.is_finite() {
            (scaled as u64).min(self.max_backoff_ms)
        } else {
            self.max_backoff_ms
        };
        Duration::from_millis(capped)
    }

    /// Jittered delay after failed attempt `attempt`, drawn from `rng`.
    ///
    /// The result lies in `[base × (1 - jitter), base × (1 + jitter)]`.
    pub fn delay_with<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let base_ms = self.base_delay(attempt).as_millis() as f64;
        if base_ms <= 0.0 || self.jitter_factor <= 0.0 {
            return Duration::from_millis(base_ms as u64);
        }

        let spread = base_ms * self.jitter_factor;
        let min = (base_ms - spread).max(0.0);
        let max = base_ms + spread;
        Duration::from_millis(rng.random_range(min..=max) as u64)
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(format!(
                "backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if !(0.0..1.0).contains(&self.jitter_factor) {
            return Err(format!(
                "jitter_factor must be in [0, 1), got {}",
                self.jitter_factor
            ));
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(format!(
                "max_backoff_ms ({}) must be >= initial_backoff_ms ({})",
                self.max_backoff_ms, self.initial_backoff_ms
            ));
        }
        Ok(())
    }
}

/// Overridable retry configuration.
///
/// Only the retryable buckets are configurable; risk and fatal failures are
/// always attempted exactly once. Omitted fields keep the bucket's own
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RetryConfigFile")]
pub struct RetryConfig {
    /// Transient bucket parameters.
    pub transient: BucketPolicy,
    /// Throttle bucket parameters.
    pub throttle: BucketPolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RetryConfigFile {
    transient: BucketPolicyPatch,
    throttle: BucketPolicyPatch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BucketPolicyPatch {
    max_attempts: Option<u32>,
    initial_backoff_ms: Option<u64>,
    backoff_multiplier: Option<f64>,
    max_backoff_ms: Option<u64>,
    jitter_factor: Option<f64>,
}

impl BucketPolicyPatch {
    fn apply(self, base: BucketPolicy) -> BucketPolicy {
        BucketPolicy {
            max_attempts: self.max_attempts.unwrap_or(base.max_attempts),
            initial_backoff_ms: self.initial_backoff_ms.unwrap_or(base.initial_backoff_ms),
            backoff_multiplier: self.backoff_multiplier.unwrap_or(base.backoff_multiplier),
            max_backoff_ms: self.max_backoff_ms.unwrap_or(base.max_backoff_ms),
            jitter_factor: self.jitter_factor.unwrap_or(base.jitter_factor),
        }
    }
}

impl From<RetryConfigFile> for RetryConfig {
    fn from(file: RetryConfigFile) -> Self {
        Self {
            transient: file.transient.apply(BucketPolicy::transient()),
            throttle: file.throttle.apply(BucketPolicy::throttle()),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            transient: BucketPolicy::transient(),
            throttle: BucketPolicy::throttle(),
        }
    }
}
