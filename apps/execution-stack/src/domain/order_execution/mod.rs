//! Order Execution Bounded Context
//!
//! The parent request, its per-child lifecycle and the aggregate result.
//!
//! # Key Concepts
//!
//! - **Execution Request**: validated, immutable input; construction is the
//!   only place precondition violations are raised
//! - **Child Lifecycle**: `planned → estimated → submitting → terminal`
//! - **Execution Result**: status derived from child outcomes

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::RequestError;
pub use services::{ChildLifecycle, ChildTracker};
pub use value_objects::{
    Algorithm, Attempt, AttemptOutcome, BookContext, ChildOutcome, ChildState, ExecutionIntent,
    ExecutionPolicy, ExecutionRequest, ExecutionResult, ExecutionStatus, OrderSide, OrderType,
    Urgency,
};
