//! Planned child order.

use std::time::Duration;

/// One sized child of a parent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildOrderPlan {
    /// Position in the parent, 0-based and stable.
    pub index: u32,
    /// Quantity, always at least 1.
    pub quantity: u64,
    /// Delay from the start of the parent request.
    pub offset: Duration,
}

impl ChildOrderPlan {
    /// Create a new plan entry.
    #[must_use]
    pub const fn new(index: u32, quantity: u64, offset: Duration) -> Self {
        Self {
            index,
            quantity,
            offset,
        }
    }
}
