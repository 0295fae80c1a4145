//! Queue posture relative to the spread.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stance of a child order relative to the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePosture {
    /// Cross the spread.
    Take,
    /// Rest at the passive touch.
    Join,
    /// Rest at the midpoint of a wide spread.
    Neutral,
}

impl QueuePosture {
    /// Lower-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Take => "take",
            Self::Join => "join",
            Self::Neutral => "neutral",
        }
    }

    /// Returns true if the posture crosses the spread.
    #[must_use]
    pub const fn is_aggressive(&self) -> bool {
        matches!(self, Self::Take)
    }
}

impl fmt::Display for QueuePosture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
