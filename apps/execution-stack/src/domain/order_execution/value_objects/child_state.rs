//! Child order lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one child within a parent execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildState {
    /// Sized and scheduled, not yet started.
    Planned,
    /// Impact estimate attached.
    Estimated,
    /// An attempt is in flight.
    Submitting,
    /// Last attempt failed retryably; waiting for backoff.
    RetryPending,
    /// Accepted by the broker.
    Succeeded,
    /// Terminally failed.
    Failed,
    /// Never started because the parent was cancelled.
    Cancelled,
}

impl ChildState {
    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }

    /// Kebab-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Estimated => "estimated",
            Self::Submitting => "submitting",
            Self::RetryPending => "retry-pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ChildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
