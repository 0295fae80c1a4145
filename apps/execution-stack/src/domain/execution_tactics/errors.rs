//! Execution Tactics Errors

use thiserror::Error;

/// Errors raised by slicing configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TacticError {
    /// Invalid configuration provided.
    #[error("Invalid slicing configuration: {message}")]
    InvalidConfiguration {
        /// Error details.
        message: String,
    },
}

impl TacticError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TacticError::InvalidConfiguration {
            message: "horizon_slices must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid slicing configuration: horizon_slices must be at least 1"
        );
    }
}
