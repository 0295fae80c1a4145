//! Paper broker for dry runs and tests.
//!
//! Accepts every order unless a failure has been scripted. Scripted failures
//! are consumed in FIFO order, one per submission, which makes retry paths
//! reproducible without a live gateway.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    BrokerOrderStatus, BrokerPort, GatewayError, OrderAck, SubmitOrderRequest,
};
use crate::domain::shared::BrokerOrderId;

/// In-process broker that never leaves the machine.
#[derive(Debug, Default)]
pub struct PaperBroker {
    latency: Duration,
    script: Mutex<VecDeque<GatewayError>>,
    orders: Mutex<HashMap<BrokerOrderId, OrderAck>>,
    submissions: Mutex<Vec<SubmitOrderRequest>>,
}

fn guard<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PaperBroker {
    /// Create a paper broker that accepts immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate gateway round-trip latency on every submission.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail the next unscripted submission with `detail`.
    pub fn fail_next(&self, detail: impl Into<String>) {
        guard(&self.script).push_back(GatewayError::new(detail));
    }

    /// Fail the next `times` submissions with `detail`.
    pub fn fail_times(&self, detail: &str, times: usize) {
        let mut script = guard(&self.script);
        for _ in 0..times {
            script.push_back(GatewayError::new(detail));
        }
    }

    /// Every submission received, in order, including failed ones.
    #[must_use]
    pub fn submissions(&self) -> Vec<SubmitOrderRequest> {
        guard(&self.submissions).clone()
    }

    /// Number of accepted orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        guard(&self.orders).len()
    }
}

#[async_trait]
impl BrokerPort for PaperBroker {
    async fn submit(&self, request: SubmitOrderRequest) -> Result<OrderAck, GatewayError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        guard(&self.submissions).push(request.clone());
        if let Some(failure) = guard(&self.script).pop_front() {
            tracing::debug!(
                client_order_id = %request.client_order_id,
                error = %failure,
                "Paper broker rejected order"
            );
            return Err(failure);
        }

        let ack = OrderAck {
            broker_order_id: BrokerOrderId::new(format!("paper-{}", uuid::Uuid::new_v4())),
            client_order_id: request.client_order_id,
            status: BrokerOrderStatus::Open,
        };
        guard(&self.orders).insert(ack.broker_order_id.clone(), ack.clone());
        Ok(ack)
    }

    async fn cancel(&self, broker_order_id: &BrokerOrderId) -> Result<(), GatewayError> {
        let mut orders = guard(&self.orders);
        let order = orders
            .get_mut(broker_order_id)
            .ok_or_else(|| GatewayError::new(format!("order {broker_order_id} not found")))?;
        if order.status == BrokerOrderStatus::Filled {
            return Err(GatewayError::new(format!(
                "order {broker_order_id} already filled"
            )));
        }
        order.status = BrokerOrderStatus::Cancelled;
        Ok(())
    }

    async fn query(&self, broker_order_id: &BrokerOrderId) -> Result<OrderAck, GatewayError> {
        guard(&self.orders)
            .get(broker_order_id)
            .cloned()
            .ok_or_else(|| GatewayError::new(format!("order {broker_order_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderSide;
    use crate::domain::shared::{ClientOrderId, Symbol};

    fn request() -> SubmitOrderRequest {
        SubmitOrderRequest::market(
            ClientOrderId::generate(),
            Symbol::new("INFY"),
            OrderSide::Buy,
            10,
        )
    }

    #[tokio::test]
    async fn accepts_and_tracks_orders() {
        let broker = PaperBroker::new();
        let ack = broker.submit(request()).await.unwrap();

        assert!(ack.broker_order_id.as_str().starts_with("paper-"));
        assert_eq!(ack.status, BrokerOrderStatus::Open);
        assert_eq!(broker.query(&ack.broker_order_id).await.unwrap(), ack);
        assert_eq!(broker.order_count(), 1);
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let broker = PaperBroker::new();
        broker.fail_next("429 Too Many Requests");
        broker.fail_next("connection reset by peer");

        let first = broker.submit(request()).await.unwrap_err();
        let second = broker.submit(request()).await.unwrap_err();
        let third = broker.submit(request()).await;

        assert_eq!(first.detail, "429 Too Many Requests");
        assert_eq!(second.detail, "connection reset by peer");
        assert!(third.is_ok());
        assert_eq!(broker.submissions().len(), 3);
        assert_eq!(broker.order_count(), 1);
    }

    #[tokio::test]
    async fn cancel_marks_order_cancelled() {
        let broker = PaperBroker::new();
        let ack = broker.submit(request()).await.unwrap();

        broker.cancel(&ack.broker_order_id).await.unwrap();
        let status = broker.query(&ack.broker_order_id).await.unwrap().status;
        assert_eq!(status, BrokerOrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn unknown_order_is_an_error() {
        let broker = PaperBroker::new();
        let err = broker
            .cancel(&BrokerOrderId::new("missing"))
            .await
            .unwrap_err();
        assert!(err.detail.contains("not found"));
    }
}
