//! Aggregate result of a parent execution.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ChildState;
use crate::domain::market_impact::ImpactEstimate;
use crate::domain::retry_policy::ErrorBucket;
use crate::domain::shared::{BrokerOrderId, TraceId};

/// Parent status derived from child outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Every child succeeded.
    Complete,
    /// At least one child succeeded and at least one did not.
    Partial,
    /// No child succeeded.
    Failed,
}

impl ExecutionStatus {
    /// Derive the parent status from child states.
    #[must_use]
    pub fn from_children(children: &[ChildOutcome]) -> Self {
        let succeeded = children
            .iter()
            .filter(|c| c.state == ChildState::Succeeded)
            .count();
        if succeeded == 0 {
            Self::Failed
        } else if succeeded == children.len() {
            Self::Complete
        } else {
            Self::Partial
        }
    }

    /// Lower-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildOutcome {
    /// Child index.
    pub index: u32,
    /// Child quantity.
    pub quantity: u64,
    /// Terminal state.
    pub state: ChildState,
    /// Attempts made.
    pub attempts: u32,
    /// Broker order id when succeeded.
    pub order_id: Option<BrokerOrderId>,
    /// Bucket of the final failure.
    pub error_bucket: Option<ErrorBucket>,
    /// Detail of the final failure.
    pub error: Option<String>,
    /// Impact estimate, absent for cancelled children.
    pub impact: Option<ImpactEstimate>,
}

impl ChildOutcome {
    /// Outcome for a child skipped by cancellation.
    #[must_use]
    pub const fn cancelled(index: u32, quantity: u64) -> Self {
        Self {
            index,
            quantity,
            state: ChildState::Cancelled,
            attempts: 0,
            order_id: None,
            error_bucket: None,
            error: None,
            impact: None,
        }
    }

    /// Returns true if the child was accepted by the broker.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.state == ChildState::Succeeded
    }
}

/// Result of one parent execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Correlation id shared with every telemetry record.
    pub trace_id: TraceId,
    /// Parent status.
    pub status: ExecutionStatus,
    /// Per-child outcomes in index order.
    pub children: Vec<ChildOutcome>,
    /// Sum of quantities of succeeded children.
    pub filled_quantity: u64,
    /// Whether cancellation stopped the request early.
    pub cancelled: bool,
    /// Telemetry writes that failed.
    pub telemetry_failures: u32,
}

impl ExecutionResult {
    /// Build a result, deriving status and filled quantity.
    #[must_use]
    pub fn new(
        trace_id: TraceId,
        children: Vec<ChildOutcome>,
        cancelled: bool,
        telemetry_failures: u32,
    ) -> Self {
        let status = ExecutionStatus::from_children(&children);
        let filled_quantity = children
            .iter()
            .filter(|c| c.succeeded())
            .map(|c| c.quantity)
            .sum();
        Self {
            trace_id,
            status,
            children,
            filled_quantity,
            cancelled,
            telemetry_failures,
        }
    }

    /// Total attempts across all children.
    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.children.iter().map(|c| c.attempts).sum()
    }

    /// Broker order ids of succeeded children, in index order.
    #[must_use]
    pub fn order_ids(&self) -> Vec<&BrokerOrderId> {
        self.children
            .iter()
            .filter_map(|c| c.order_id.as_ref())
            .collect()
    }
}
