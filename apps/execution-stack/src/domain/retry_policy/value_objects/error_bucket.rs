//! Failure buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a failed submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorBucket {
    /// Network trouble, timeouts, 5xx, gateway unavailable.
    Transient,
    /// Rate limiting by the gateway.
    Throttle,
    /// Margin, funds or exposure limit rejection.
    Risk,
    /// Anything else, including malformed requests.
    Fatal,
}

impl ErrorBucket {
    /// All buckets in classification order.
    pub const ALL: [Self; 4] = [Self::Throttle, Self::Risk, Self::Transient, Self::Fatal];

    /// Whether failures in this bucket may be retried at all.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient | Self::Throttle)
    }

    /// Lower-case label used in records and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transient => "transient",
            Self::Throttle => "throttle",
            Self::Risk => "risk",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_buckets() {
        assert!(ErrorBucket::Transient.is_retryable());
        assert!(ErrorBucket::Throttle.is_retryable());
        assert!(!ErrorBucket::Risk.is_retryable());
        assert!(!ErrorBucket::Fatal.is_retryable());
    }

    #[test]
    fn bucket_serde() {
        let json = serde_json::to_string(&ErrorBucket::Throttle).unwrap();
        assert_eq!(json, "\"throttle\"");
        let parsed: ErrorBucket = serde_json::from_str("\"risk\"").unwrap();
        assert_eq!(parsed, ErrorBucket::Risk);
    }
}
