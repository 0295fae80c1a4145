//! Execution Tactics Bounded Context
//!
//! Turns a parent quantity into an ordered list of sized, scheduled children
//! (IMMEDIATE, IS, TWAP, VWAP, POV).

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::TacticError;
pub use services::SlicingPlanner;
pub use value_objects::{ChildOrderPlan, SlicingConfig};
