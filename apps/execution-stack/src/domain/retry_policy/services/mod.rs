//! Retry Policy Domain Services

mod error_classifier;
mod retry_policy;

pub use error_classifier::ErrorClassifier;
pub use retry_policy::{RetryDecision, RetryPolicy};
