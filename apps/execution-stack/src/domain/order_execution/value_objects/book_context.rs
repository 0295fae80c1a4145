//! Book context captured when a request is constructed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const BPS: Decimal = dec!(10000);

/// Read-only top-of-book snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BookContext {
    /// Best bid price (zero when unknown).
    #[serde(default)]
    pub bid: Decimal,
    /// Best ask price (zero when unknown).
    #[serde(default)]
    pub ask: Decimal,
    /// Last traded price.
    pub last: Decimal,
    /// Estimated market volume per slice interval; an injected proxy value.
    #[serde(default)]
    pub volume_rate: f64,
}

impl BookContext {
    /// Create a book context without a volume estimate.
    #[must_use]
    pub const fn new(bid: Decimal, ask: Decimal, last: Decimal) -> Self {
        Self {
            bid,
            ask,
            last,
            volume_rate: 0.0,
        }
    }

    /// Attach a volume-rate estimate.
    #[must_use]
    pub const fn with_volume_rate(mut self, volume_rate: f64) -> Self {
        self.volume_rate = volume_rate;
        self
    }

    /// Returns true when both sides are positive and not crossed.
    #[must_use]
    pub fn has_two_sided_quote(&self) -> bool {
        self.bid > Decimal::ZERO && self.ask > Decimal::ZERO && self.ask >= self.bid
    }

    /// Quoted spread; zero without a usable two-sided quote.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        if self.has_two_sided_quote() {
            self.ask - self.bid
        } else {
            Decimal::ZERO
        }
    }

    /// Midpoint, or the last price without a usable quote.
    #[must_use]
    pub fn mid(&self) -> Decimal {
        if self.has_two_sided_quote() {
            (self.bid + self.ask) / Decimal::TWO
        } else {
            self.last
        }
    }

    /// Spread in basis points of the last price (midpoint if last is zero).
    #[must_use]
    pub fn spread_bps(&self) -> Decimal {
        let reference = if self.last > Decimal::ZERO {
            self.last
        } else {
            self.mid()
        };
        if reference <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.spread() / reference * BPS
    }
}
