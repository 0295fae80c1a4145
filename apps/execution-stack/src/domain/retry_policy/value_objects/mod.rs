//! Retry Policy Value Objects

mod bucket_policy;
mod error_bucket;

pub use bucket_policy::{BucketPolicy, RetryConfig};
pub use error_bucket::ErrorBucket;
