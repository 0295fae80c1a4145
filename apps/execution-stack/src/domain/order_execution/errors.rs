//! Order execution errors.
//!
//! Every variant is a precondition violation: the request is structurally
//! invalid and is rejected before any child is created.

use thiserror::Error;

/// Reasons an execution request cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Total quantity is zero or negative.
    #[error("Quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The rejected quantity.
        quantity: i64,
    },

    /// Algorithm name is not recognized.
    #[error("Unknown execution algorithm: {algorithm}")]
    UnknownAlgorithm {
        /// The rejected algorithm name.
        algorithm: String,
    },

    /// Child cap is below one.
    #[error("max_children must be at least 1, got {max_children}")]
    InvalidMaxChildren {
        /// The rejected cap.
        max_children: i64,
    },

    /// Participation rate outside (0, 1].
    #[error("participation_rate must be in (0, 1], got {rate}")]
    InvalidParticipationRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Symbol failed validation.
    #[error("Invalid symbol: {message}")]
    InvalidSymbol {
        /// Validation message.
        message: String,
    },

    /// A price field is negative or missing its reference.
    #[error("Invalid {field}: {message}")]
    InvalidPrice {
        /// Offending field.
        field: &'static str,
        /// Error message.
        message: String,
    },
}

impl RequestError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveQuantity { .. } => "quantity",
            Self::UnknownAlgorithm { .. } => "algorithm",
            Self::InvalidMaxChildren { .. } => "max_children",
            Self::InvalidParticipationRate { .. } => "participation_rate",
            Self::InvalidSymbol { .. } => "symbol",
            Self::InvalidPrice { field, .. } => field,
        }
    }
}
