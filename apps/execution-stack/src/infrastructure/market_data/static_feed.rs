//! Fixed book snapshots keyed by symbol.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{BookSnapshot, MarketDataError, MarketDataPort};
use crate::domain::shared::Symbol;

/// Market data source backed by an in-memory table.
///
/// Used by the binary to fill in a book when a request omits one, and by
/// tests that need a stable quote.
#[derive(Debug, Default)]
pub struct StaticMarketData {
    books: RwLock<HashMap<String, BookSnapshot>>,
}

impl StaticMarketData {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StaticMarketData::set`].
    #[must_use]
    pub fn with_snapshot(self, symbol: &str, snapshot: BookSnapshot) -> Self {
        self.set(symbol, snapshot);
        self
    }

    /// Insert or replace the snapshot for a symbol.
    pub fn set(&self, symbol: &str, snapshot: BookSnapshot) {
        self.books
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Symbol::new(symbol).into_inner(), snapshot);
    }
}

#[async_trait]
impl MarketDataPort for StaticMarketData {
    async fn snapshot(&self, symbol: &Symbol) -> Result<BookSnapshot, MarketDataError> {
        self.books
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol.as_str())
            .copied()
            .ok_or_else(|| MarketDataError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> BookSnapshot {
        BookSnapshot {
            bid: dec!(99.9),
            ask: dec!(100.1),
            last: dec!(100),
            volume_rate: 500.0,
        }
    }

    #[tokio::test]
    async fn returns_stored_snapshot() {
        let feed = StaticMarketData::new().with_snapshot("INFY", snapshot());
        let book = feed.snapshot(&Symbol::new("INFY")).await.unwrap();
        assert_eq!(book, snapshot());
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let feed = StaticMarketData::new().with_snapshot("infy", snapshot());
        assert!(feed.snapshot(&Symbol::new("INFY")).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_symbol_is_an_error() {
        let feed = StaticMarketData::new();
        let err = feed.snapshot(&Symbol::new("TCS")).await.unwrap_err();
        assert_eq!(
            err,
            MarketDataError::UnknownSymbol {
                symbol: "TCS".to_string()
            }
        );
    }
}
