//! Order Execution Domain Services

mod child_lifecycle;

pub use child_lifecycle::{ChildLifecycle, ChildTracker};
