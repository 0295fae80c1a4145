//! Retry Policy Bounded Context
//!
//! Classifies broker failures into buckets and decides, per bucket, whether
//! a failed attempt is retried and after how long.
//!
//! | Bucket | Retryable | Default attempts | Backoff |
//! |--------|-----------|------------------|---------|
//! | `throttle` | yes | 3 | 1s rate window, ±10% |
//! | `risk` | no | 1 | none |
//! | `transient` | yes | 3 | 200ms ×2 capped at 1s, ±20% |
//! | `fatal` | no | 1 | none |

pub mod services;
pub mod value_objects;

pub use services::{ErrorClassifier, RetryDecision, RetryPolicy};
pub use value_objects::{BucketPolicy, ErrorBucket, RetryConfig};
