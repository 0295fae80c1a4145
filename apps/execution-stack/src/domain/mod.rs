//! Domain Layer
//!
//! Business logic with zero infrastructure dependencies. Every component here
//! is pure; side effects live behind the ports in [`crate::application`].
//!
//! # Bounded Contexts
//!
//! - [`order_execution`]: Request, child lifecycle and result
//! - [`order_routing`]: Queue posture and effective price
//! - [`execution_tactics`]: Slicing of a parent into children
//! - [`market_impact`]: Pre-trade slippage estimation
//! - [`retry_policy`]: Failure buckets and backoff

pub mod execution_tactics;
pub mod market_impact;
pub mod order_execution;
pub mod order_routing;
pub mod retry_policy;
pub mod shared;
