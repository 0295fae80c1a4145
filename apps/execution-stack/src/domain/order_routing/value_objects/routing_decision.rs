//! Routing decision shared by all children of a parent request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::QueuePosture;
use crate::domain::order_execution::value_objects::OrderType;

/// Output of the order router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Queue posture.
    pub posture: QueuePosture,
    /// Effective order type.
    pub order_type: OrderType,
    /// Effective limit price; `None` for market orders.
    pub limit_price: Option<Decimal>,
    /// Venue label.
    pub route: String,
}

impl RoutingDecision {
    /// Market order crossing the spread.
    #[must_use]
    pub fn market(posture: QueuePosture, route: impl Into<String>) -> Self {
        Self {
            posture,
            order_type: OrderType::Market,
            limit_price: None,
            route: route.into(),
        }
    }

    /// Limit order at `price`.
    #[must_use]
    pub fn limit(posture: QueuePosture, price: Decimal, route: impl Into<String>) -> Self {
        Self {
            posture,
            order_type: OrderType::Limit,
            limit_price: Some(price),
            route: route.into(),
        }
    }
}
