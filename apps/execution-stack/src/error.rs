//! Rich error handling for the execution stack.
//!
//! Broker failures never surface here: they are classified, retried and
//! reported per child in the execution result. An [`ExecutionError`] means
//! the request as a whole could not run.
//!
//! | Code | Usage |
//! |------|-------|
//! | `PRECONDITION_VIOLATION` | Structurally invalid request, rejected before any child |
//! | `TELEMETRY_UNAVAILABLE` | Telemetry stream could not be opened |
//! | `CONFIG_INVALID` | Configuration failed to load or validate |
//! | `INTERNAL_ERROR` | Broken internal invariant |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order_execution::RequestError;
use crate::domain::shared::DomainError;

/// Error codes for the execution stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request rejected before execution.
    PreconditionViolation,
    /// Telemetry stream unavailable.
    TelemetryUnavailable,
    /// Invalid configuration.
    ConfigInvalid,
    /// Internal error.
    InternalError,
}

impl ErrorCode {
    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::PreconditionViolation => "PRECONDITION_VIOLATION",
            Self::TelemetryUnavailable => "TELEMETRY_UNAVAILABLE",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Process exit code used by the binary.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::PreconditionViolation => 2,
            Self::ConfigInvalid => 3,
            Self::TelemetryUnavailable => 4,
            Self::InternalError => 1,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// A rich error with context for the execution stack.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct ExecutionError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ExecutionError {
    /// Create a new execution error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up a context value.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serializable body for machine-readable output.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

/// Machine-readable error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: BTreeMap<String, String>,
}

/// Convenience constructors for common errors.
impl ExecutionError {
    /// Request failed a precondition.
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PreconditionViolation, message)
    }

    /// Invalid configuration.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Telemetry stream could not be opened.
    #[must_use]
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TelemetryUnavailable, message)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<RequestError> for ExecutionError {
    fn from(err: RequestError) -> Self {
        Self::precondition(err.to_string()).with_context("field", err.field())
    }
}

impl From<DomainError> for ExecutionError {
    fn from(err: DomainError) -> Self {
        Self::internal(err.to_string())
    }
}
