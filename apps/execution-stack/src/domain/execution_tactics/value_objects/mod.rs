//! Execution Tactics Value Objects

mod child_order_plan;
mod slicing_config;

pub use child_order_plan::ChildOrderPlan;
pub use slicing_config::SlicingConfig;
