//! Order Execution Value Objects
//!
//! Immutable types describing a parent request and its outcome.

mod algorithm;
mod attempt;
mod book_context;
mod child_state;
mod execution_policy;
mod execution_request;
mod execution_result;
mod order_side;
mod order_type;
mod urgency;

pub use algorithm::Algorithm;
pub use attempt::{Attempt, AttemptOutcome};
pub use book_context::BookContext;
pub use child_state::ChildState;
pub use execution_policy::{DEFAULT_PARTICIPATION_RATE, ExecutionPolicy};
pub use execution_request::{ExecutionIntent, ExecutionRequest};
pub use execution_result::{ChildOutcome, ExecutionResult, ExecutionStatus};
pub use order_side::OrderSide;
pub use order_type::OrderType;
pub use urgency::Urgency;
