//! Market data adapters.

mod static_feed;

pub use static_feed::StaticMarketData;
