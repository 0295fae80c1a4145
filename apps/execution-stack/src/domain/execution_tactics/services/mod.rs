//! Execution Tactics Domain Services

mod slicing_planner;

pub use slicing_planner::SlicingPlanner;
