//! Submission attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::retry_policy::ErrorBucket;
use crate::domain::shared::BrokerOrderId;

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Broker accepted the order.
    Placed {
        /// Broker order id.
        order_id: BrokerOrderId,
    },
    /// Attempt failed.
    Error {
        /// Failure classification.
        bucket: ErrorBucket,
        /// Raw error detail.
        detail: String,
    },
}

impl AttemptOutcome {
    /// Returns true for an accepted attempt.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    /// Failure bucket, if the attempt failed.
    #[must_use]
    pub const fn bucket(&self) -> Option<ErrorBucket> {
        match self {
            Self::Placed { .. } => None,
            Self::Error { bucket, .. } => Some(*bucket),
        }
    }
}

/// One submission attempt of one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Child index.
    pub child_index: u32,
    /// Attempt number, starting at 1.
    pub attempt: u32,
    /// When the attempt completed.
    pub timestamp: DateTime<Utc>,
    /// Submission round-trip in milliseconds.
    pub latency_ms: u64,
    /// Outcome.
    pub outcome: AttemptOutcome,
}
