//! Child Lifecycle Service
//!
//! Validates child state transitions.
//!
//! ```text
//! planned ─► estimated ─► submitting ─┬─► succeeded
//!    │                        ▲       ├─► failed
//!    ▼                        │       └─► retry-pending
//! cancelled                   └────────────────┘
//! ```

use crate::domain::order_execution::value_objects::ChildState;
use crate::domain::shared::DomainError;

/// State machine for child orders.
pub struct ChildLifecycle;

impl ChildLifecycle {
    /// Check if a state transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: ChildState, to: ChildState) -> bool {
        matches!(
            (from, to),
            (ChildState::Planned, ChildState::Estimated)
                | (ChildState::Planned, ChildState::Cancelled)
                | (ChildState::Estimated, ChildState::Submitting)
                | (ChildState::Submitting, ChildState::Succeeded)
                | (ChildState::Submitting, ChildState::RetryPending)
                | (ChildState::Submitting, ChildState::Failed)
                | (ChildState::RetryPending, ChildState::Submitting)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid.
    pub fn validate_transition(from: ChildState, to: ChildState) -> Result<(), DomainError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                entity: "Child".to_string(),
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: ChildState) -> Vec<ChildState> {
        match from {
            ChildState::Planned => vec![ChildState::Estimated, ChildState::Cancelled],
            ChildState::Estimated => vec![ChildState::Submitting],
            ChildState::Submitting => vec![
                ChildState::Succeeded,
                ChildState::RetryPending,
                ChildState::Failed,
            ],
            ChildState::RetryPending => vec![ChildState::Submitting],
            ChildState::Succeeded | ChildState::Failed | ChildState::Cancelled => vec![],
        }
    }
}

/// Tracks one child's current state, rejecting invalid moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildTracker {
    index: u32,
    state: ChildState,
}

impl ChildTracker {
    /// Start tracking a planned child.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            state: ChildState::Planned,
        }
    }

    /// Child index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ChildState {
        self.state
    }

    /// Move to `to`.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid; the state is unchanged.
    pub fn advance(&mut self, to: ChildState) -> Result<(), DomainError> {
        ChildLifecycle::validate_transition(self.state, to)?;
        self.state = to;
        Ok(())
    }
}
