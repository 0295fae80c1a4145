//! Broker Port (Driven Port)
//!
//! Narrow interface to the order gateway. The engine never interprets
//! gateway failures beyond their detail string, which the retry policy
//! classifies.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::value_objects::{OrderSide, OrderType};
use crate::domain::shared::{BrokerOrderId, ClientOrderId, Symbol};

/// Request to submit one child order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrderRequest {
    /// Client order ID, unique per attempt.
    pub client_order_id: ClientOrderId,
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Quantity.
    pub quantity: u64,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price (for limit orders).
    pub limit_price: Option<Decimal>,
}

impl SubmitOrderRequest {
    /// Create a market order request.
    #[must_use]
    pub const fn market(
        client_order_id: ClientOrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: u64,
    ) -> Self {
        Self {
            client_order_id,
            symbol,
            side,
            quantity,
            order_type: OrderType::Market,
            limit_price: None,
        }
    }

    /// Create a limit order request.
    #[must_use]
    pub const fn limit(
        client_order_id: ClientOrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: u64,
        limit_price: Decimal,
    ) -> Self {
        Self {
            client_order_id,
            symbol,
            side,
            quantity,
            order_type: OrderType::Limit,
            limit_price: Some(limit_price),
        }
    }
}

/// Broker-side order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerOrderStatus {
    /// Accepted and working.
    Open,
    /// Fully filled.
    Filled,
    /// Cancelled.
    Cancelled,
}

/// Acknowledgment from broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Broker-assigned order ID.
    pub broker_order_id: BrokerOrderId,
    /// Client order ID echoed back.
    pub client_order_id: ClientOrderId,
    /// Current status.
    pub status: BrokerOrderStatus,
}

/// Gateway failure. Only the detail is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct GatewayError {
    /// Raw failure detail.
    pub detail: String,
}

impl GatewayError {
    /// Create a gateway error.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Port for broker interactions.
#[async_trait]
pub trait BrokerPort: Send + Sync {
    /// Submit an order to the broker.
    async fn submit(&self, request: SubmitOrderRequest) -> Result<OrderAck, GatewayError>;

    /// Cancel an order.
    async fn cancel(&self, broker_order_id: &BrokerOrderId) -> Result<(), GatewayError>;

    /// Get order status.
    async fn query(&self, broker_order_id: &BrokerOrderId) -> Result<OrderAck, GatewayError>;
}
