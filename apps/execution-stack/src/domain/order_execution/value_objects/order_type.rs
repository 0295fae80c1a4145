//! Parent and child order type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a child is priced at the gateway.
///
/// The parent's type is a hint; the router decides the child's final type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Take whatever the book offers.
    #[default]
    #[serde(alias = "market")]
    Market,
    /// Rest at (or cross to) a price.
    #[serde(alias = "limit")]
    Limit,
}

impl OrderType {
    /// Wire label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
