//! Market Impact Domain Services

mod proxy_impact_model;

pub use proxy_impact_model::ProxyImpactModel;

use crate::domain::market_impact::value_objects::ImpactEstimate;
use crate::domain::order_execution::value_objects::{BookContext, OrderSide};

/// Pre-trade impact estimator.
///
/// Implementations must be pure: the same inputs always yield the same
/// estimate.
pub trait ImpactEstimator: Send + Sync {
    /// Estimate the cost of one child order.
    fn estimate(
        &self,
        book: &BookContext,
        side: OrderSide,
        participation_rate: f64,
        child_quantity: u64,
        parent_quantity: u64,
    ) -> ImpactEstimate;
}
