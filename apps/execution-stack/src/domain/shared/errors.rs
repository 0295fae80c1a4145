//! Domain errors for the execution stack.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Invalid state transition attempted.
    InvalidStateTransition {
        /// Entity type (e.g., "Child").
        entity: String,
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
    },

    /// Invariant violated.
    InvariantViolation {
        /// Invariant that was violated.
        invariant: String,
        /// Current state description.
        state: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The offending field, when the error is about a single field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::InvalidStateTransition { entity, from, to } => {
                write!(f, "Invalid state transition for {entity}: {from} -> {to}")
            }
            Self::InvariantViolation { invariant, state } => {
                write!(f, "Invariant violation: {invariant} (state: {state})")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::invalid("quantity", "must be positive");
        let msg = format!("{err}");
        assert!(msg.contains("quantity"));
        assert!(msg.contains("positive"));
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn invalid_state_transition_display() {
        let err = DomainError::InvalidStateTransition {
            entity: "Child".to_string(),
            from: "succeeded".to_string(),
            to: "submitting".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition for Child: succeeded -> submitting"
        );
        assert!(err.field().is_none());
    }

    #[test]
    fn invariant_display() {
        let err = DomainError::InvariantViolation {
            invariant: "sum(children) == parent".to_string(),
            state: "99 != 100".to_string(),
        };
        assert!(err.to_string().contains("sum(children) == parent"));
    }

    #[test]
    fn domain_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&DomainError::invalid("x", "y"));
    }
}
