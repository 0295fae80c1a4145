//! Retry decisions per bucket.

use std::time::Duration;

use rand::Rng;

use crate::domain::retry_policy::value_objects::{BucketPolicy, ErrorBucket, RetryConfig};

use super::ErrorClassifier;

/// Outcome of consulting the policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then submit attempt `next_attempt`.
    Retry {
        /// Attempt number to submit next.
        next_attempt: u32,
        /// Backoff before the next attempt.
        delay: Duration,
    },
    /// The child is terminally failed.
    GiveUp,
}

/// Retry policy built from configuration.
///
/// Risk and fatal buckets always use [`BucketPolicy::no_retry`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    transient: BucketPolicy,
    throttle: BucketPolicy,
    no_retry: BucketPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Build a policy from configuration.
    #[must_use]
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            transient: config.transient.clone(),
            throttle: config.throttle.clone(),
            no_retry: BucketPolicy::no_retry(),
        }
    }

    /// Classify an error detail.
    #[must_use]
    pub fn classify(&self, detail: &str) -> ErrorBucket {
        ErrorClassifier::classify(detail)
    }

    /// Parameters governing a bucket.
    #[must_use]
    pub const fn bucket_policy(&self, bucket: ErrorBucket) -> &BucketPolicy {
        match bucket {
            ErrorBucket::Transient => &self.transient,
            ErrorBucket::Throttle => &self.throttle,
            ErrorBucket::Risk | ErrorBucket::Fatal => &self.no_retry,
        }
    }

    /// Maximum attempts for a bucket, including the first.
    #[must_use]
    pub const fn max_attempts(&self, bucket: ErrorBucket) -> u32 {
        self.bucket_policy(bucket).max_attempts
    }

    /// Decide what follows failed attempt `attempt` (1-based).
    #[must_use]
    pub fn decide(&self, bucket: ErrorBucket, attempt: u32) -> RetryDecision {
        self.decide_with(bucket, attempt, &mut rand::rng())
    }

    /// Same as [`Self::decide`] with an explicit jitter source.
    pub fn decide_with<R: Rng + ?Sized>(
        &self,
        bucket: ErrorBucket,
        attempt: u32,
        rng: &mut R,
    ) -> RetryDecision {
        let policy = self.bucket_policy(bucket);
        if !bucket.is_retryable() || attempt >= policy.max_attempts {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Retry {
            next_attempt: attempt + 1,
            delay: policy.delay_with(attempt, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_max_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(ErrorBucket::Transient), 3);
        assert_eq!(policy.max_attempts(ErrorBucket::Throttle), 3);
        assert_eq!(policy.max_attempts(ErrorBucket::Risk), 1);
        assert_eq!(policy.max_attempts(ErrorBucket::Fatal), 1);
    }

    #[test]
    fn risk_and_fatal_never_retry() {
        let config = RetryConfig {
            transient: BucketPolicy {
                max_attempts: 10,
                ..BucketPolicy::transient()
            },
            ..RetryConfig::default()
        };
        let policy = RetryPolicy::new(&config);
        assert_eq!(policy.decide(ErrorBucket::Risk, 1), RetryDecision::GiveUp);
        assert_eq!(policy.decide(ErrorBucket::Fatal, 1), RetryDecision::GiveUp);
        assert_eq!(policy.max_attempts(ErrorBucket::Transient), 10);
    }

    #[test]
    fn transient_retries_until_bound() {
        let policy = RetryPolicy::default();
        let mut rng = StdRng::seed_from_u64(3);

        match policy.decide_with(ErrorBucket::Transient, 1, &mut rng) {
            RetryDecision::Retry {
                next_attempt,
                delay,
            } => {
                assert_eq!(next_attempt, 2);
                assert!(delay <= Duration::from_millis(240));
            }
            RetryDecision::GiveUp => panic!("first transient failure should retry"),
        }
        assert!(matches!(
            policy.decide_with(ErrorBucket::Transient, 2, &mut rng),
            RetryDecision::Retry { next_attempt: 3, .. }
        ));
        assert_eq!(
            policy.decide_with(ErrorBucket::Transient, 3, &mut rng),
            RetryDecision::GiveUp
        );
    }

    #[test]
    fn throttle_waits_about_one_window() {
        let policy = RetryPolicy::default();
        let mut rng = StdRng::seed_from_u64(11);
        match policy.decide_with(ErrorBucket::Throttle, 2, &mut rng) {
            RetryDecision::Retry { delay, .. } => {
                assert!(delay >= Duration::from_millis(900));
                assert!(delay <= Duration::from_millis(1_100));
            }
            RetryDecision::GiveUp => panic!("second throttle failure should retry"),
        }
    }

    #[test]
    fn classify_delegates() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.classify("429 Too Many Requests"), ErrorBucket::Throttle);
    }
}
