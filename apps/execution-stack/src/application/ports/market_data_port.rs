//! Market Data Port (Driven Port)
//!
//! Source of book snapshots for building execution requests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::value_objects::BookContext;
use crate::domain::shared::Symbol;

/// Point-in-time view of the top of book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
    /// Last traded price.
    pub last: Decimal,
    /// Estimated market volume per slice interval.
    #[serde(default)]
    pub volume_rate: f64,
}

impl From<BookSnapshot> for BookContext {
    fn from(snapshot: BookSnapshot) -> Self {
        Self::new(snapshot.bid, snapshot.ask, snapshot.last).with_volume_rate(snapshot.volume_rate)
    }
}

/// Market data error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// No data for the symbol.
    #[error("No market data for {symbol}")]
    UnknownSymbol {
        /// The missing symbol.
        symbol: String,
    },

    /// Feed unavailable.
    #[error("Market data unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for book snapshots.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Current snapshot for a symbol.
    async fn snapshot(&self, symbol: &Symbol) -> Result<BookSnapshot, MarketDataError>;
}
