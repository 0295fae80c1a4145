//! Execution request: the immutable input to one parent execution.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Algorithm, BookContext, ExecutionPolicy, OrderSide, OrderType, Urgency};
use crate::domain::order_execution::errors::RequestError;
use crate::domain::shared::Symbol;

/// Unvalidated execution intent as supplied by a caller.
///
/// Loosely typed on purpose: the algorithm name and numeric bounds are
/// checked when the intent is turned into an [`ExecutionRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionIntent {
    /// Instrument symbol.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Total quantity.
    pub quantity: i64,
    /// Order-type hint.
    #[serde(default)]
    pub order_type: OrderType,
    /// Limit-price hint.
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Book snapshot at intent time. May be omitted when the book is
    /// supplied through [`ExecutionRequest::from_snapshot`].
    #[serde(default)]
    pub book: BookContext,
    /// Algorithm name.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Urgency.
    #[serde(default)]
    pub urgency: Urgency,
    /// Child cap.
    #[serde(default = "default_max_children")]
    pub max_children: i64,
    /// Participation rate for VWAP/POV.
    #[serde(default = "default_participation_rate")]
    pub participation_rate: f64,
    /// Perturb child sizes.
    #[serde(default = "default_randomize_slices")]
    pub randomize_slices: bool,
    /// Perturbation seed override.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Free-form tags (e.g. `source`, `signal_id`).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn default_algorithm() -> String {
    Algorithm::Immediate.as_str().to_string()
}

const fn default_max_children() -> i64 {
    1
}

const fn default_participation_rate() -> f64 {
    super::execution_policy::DEFAULT_PARTICIPATION_RATE
}

const fn default_randomize_slices() -> bool {
    true
}

impl ExecutionIntent {
    /// Create a market intent with default policy options.
    #[must_use]
    pub fn market(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: i64,
        book: BookContext,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            order_type: OrderType::Market,
            limit_price: None,
            book,
            algorithm: default_algorithm(),
            urgency: Urgency::Normal,
            max_children: default_max_children(),
            participation_rate: default_participation_rate(),
            randomize_slices: default_randomize_slices(),
            seed: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Create a limit intent with default policy options.
    #[must_use]
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: i64,
        limit_price: Decimal,
        book: BookContext,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            limit_price: Some(limit_price),
            ..Self::market(symbol, side, quantity, book)
        }
    }

    /// Set the algorithm by name.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Set the child cap.
    #[must_use]
    pub const fn with_max_children(mut self, max_children: i64) -> Self {
        self.max_children = max_children;
        self
    }

    /// Set the urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Set the participation rate.
    #[must_use]
    pub const fn with_participation_rate(mut self, rate: f64) -> Self {
        self.participation_rate = rate;
        self
    }

    /// Enable or disable slice randomization.
    #[must_use]
    pub const fn with_randomize_slices(mut self, randomize: bool) -> Self {
        self.randomize_slices = randomize;
        self
    }

    /// Fix the perturbation seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attach a metadata tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace the book snapshot.
    #[must_use]
    pub const fn with_book(mut self, book: BookContext) -> Self {
        self.book = book;
        self
    }
}

/// Validated, immutable execution request.
///
/// Can only be obtained through [`ExecutionRequest::new`], so every instance
/// satisfies the structural preconditions.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRequest {
    symbol: Symbol,
    side: OrderSide,
    quantity: u64,
    order_type: OrderType,
    limit_price: Option<Decimal>,
    book: BookContext,
    policy: ExecutionPolicy,
    metadata: BTreeMap<String, String>,
}

impl ExecutionRequest {
    /// Validate an intent into a request.
    ///
    /// # Errors
    ///
    /// Returns the first precondition the intent violates.
    pub fn new(intent: ExecutionIntent) -> Result<Self, RequestError> {
        let symbol = Symbol::new(intent.symbol);
        symbol.validate().map_err(|e| RequestError::InvalidSymbol {
            message: e.to_string(),
        })?;

        let quantity = u64::try_from(intent.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(RequestError::NonPositiveQuantity {
                quantity: intent.quantity,
            })?;

        let algorithm: Algorithm = intent
            .algorithm
            .parse()
            .map_err(|algorithm| RequestError::UnknownAlgorithm { algorithm })?;

        let max_children = u32::try_from(intent.max_children)
            .ok()
            .filter(|m| *m >= 1)
            .ok_or(RequestError::InvalidMaxChildren {
                max_children: intent.max_children,
            })?;

        let rate = intent.participation_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(RequestError::InvalidParticipationRate { rate });
        }

        validate_book(&intent.book)?;
        if let Some(price) = intent.limit_price {
            if price <= Decimal::ZERO {
                return Err(RequestError::InvalidPrice {
                    field: "limit_price",
                    message: format!("must be positive, got {price}"),
                });
            }
        }

        Ok(Self {
            symbol,
            side: intent.side,
            quantity,
            order_type: intent.order_type,
            limit_price: intent.limit_price,
            book: intent.book,
            policy: ExecutionPolicy {
                algorithm,
                urgency: intent.urgency,
                max_children,
                participation_rate: rate,
                randomize_slices: intent.randomize_slices,
                seed: intent.seed,
            },
            metadata: intent.metadata,
        })
    }

    /// Validate an intent against a freshly captured book, replacing any
    /// book the intent carried.
    ///
    /// # Errors
    ///
    /// Returns the first precondition the intent or snapshot violates.
    pub fn from_snapshot(
        intent: ExecutionIntent,
        snapshot: impl Into<BookContext>,
    ) -> Result<Self, RequestError> {
        Self::new(intent.with_book(snapshot.into()))
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Buy or sell.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Total parent quantity.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Order-type hint.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Limit-price hint.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Decimal> {
        self.limit_price
    }

    /// Book snapshot captured at construction.
    #[must_use]
    pub const fn book(&self) -> &BookContext {
        &self.book
    }

    /// Policy record.
    #[must_use]
    pub const fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    /// Metadata tags.
    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Metadata tag lookup.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

impl TryFrom<ExecutionIntent> for ExecutionRequest {
    type Error = RequestError;

    fn try_from(intent: ExecutionIntent) -> Result<Self, Self::Error> {
        Self::new(intent)
    }
}

fn validate_book(book: &BookContext) -> Result<(), RequestError> {
    for (field, value) in [
        ("book.bid", book.bid),
        ("book.ask", book.ask),
        ("book.last", book.last),
    ] {
        if value < Decimal::ZERO {
            return Err(RequestError::InvalidPrice {
                field,
                message: format!("must not be negative, got {value}"),
            });
        }
    }

    if book.last <= Decimal::ZERO && !book.has_two_sided_quote() {
        return Err(RequestError::InvalidPrice {
            field: "book.last",
            message: "book has no price reference".to_string(),
        });
    }

    if !book.volume_rate.is_finite() || book.volume_rate < 0.0 {
        return Err(RequestError::InvalidPrice {
            field: "book.volume_rate",
            message: format!("must be a non-negative number, got {}", book.volume_rate),
        });
    }

    Ok(())
}
