//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.

mod identifiers;
mod symbol;
mod trading_mode;

pub use identifiers::{BrokerOrderId, ClientOrderId, TraceId};
pub use symbol::Symbol;
pub use trading_mode::TradingMode;
