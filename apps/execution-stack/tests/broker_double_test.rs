//! Orchestrator behaviour observed through a mocked gateway.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;

use execution_stack::application::ports::{
    BrokerOrderStatus, BrokerPort, GatewayError, OrderAck, SubmitOrderRequest,
};
use execution_stack::domain::market_impact::ProxyImpactModel;
use execution_stack::domain::order_routing::QueuePosture;
use execution_stack::domain::shared::BrokerOrderId;
use execution_stack::{
    BookContext, ChildState, ExecutionIntent, ExecutionOrchestrator, ExecutionRequest,
    ExecutionStatus, InMemoryTelemetrySink, OrchestratorConfig, OrderSide, OrderType, Urgency,
};

type SubmitFuture = Pin<Box<dyn Future<Output = Result<OrderAck, GatewayError>> + Send + 'static>>;

// The mock returns a boxed future so the async trait method can delegate to it.
mock! {
    pub Gateway {
        fn submit_mock(&self, request: SubmitOrderRequest) -> SubmitFuture;
    }
}

#[async_trait]
impl BrokerPort for MockGateway {
    async fn submit(&self, request: SubmitOrderRequest) -> Result<OrderAck, GatewayError> {
        self.submit_mock(request).await
    }

    async fn cancel(&self, _broker_order_id: &BrokerOrderId) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn query(&self, broker_order_id: &BrokerOrderId) -> Result<OrderAck, GatewayError> {
        Err(GatewayError::new(format!("order {broker_order_id} not found")))
    }
}

fn accept(request: SubmitOrderRequest) -> SubmitFuture {
    Box::pin(async move {
        Ok(OrderAck {
            broker_order_id: BrokerOrderId::new(format!("mock-{}", request.client_order_id)),
            client_order_id: request.client_order_id,
            status: BrokerOrderStatus::Open,
        })
    })
}

fn tight_book() -> BookContext {
    // 10 bps
    BookContext::new(dec!(99.95), dec!(100.05), dec!(100))
}

fn wide_book() -> BookContext {
    // 50 bps
    BookContext::new(dec!(99.75), dec!(100.25), dec!(100))
}

fn orchestrator(
    gateway: MockGateway,
    sink: Arc<InMemoryTelemetrySink>,
) -> ExecutionOrchestrator<MockGateway, InMemoryTelemetrySink, ProxyImpactModel> {
    ExecutionOrchestrator::new(
        Arc::new(gateway),
        sink,
        Arc::new(ProxyImpactModel::default()),
        OrchestratorConfig::default(),
    )
}

#[tokio::test]
async fn test_normal_urgency_joins_passive_touch() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_submit_mock()
        .withf(|r| {
            r.order_type == OrderType::Limit
                && r.limit_price == Some(dec!(99.95))
                && r.quantity == 10
        })
        .times(1)
        .returning(accept);
    let sink = Arc::new(InMemoryTelemetrySink::new());

    let intent = ExecutionIntent::market("INFY", OrderSide::Buy, 10, tight_book());
    let result = orchestrator(gateway, Arc::clone(&sink))
        .execute_intent(intent)
        .await
        .unwrap();

    assert_eq!(result.status, ExecutionStatus::Complete);
    assert_eq!(sink.records()[0].queue_posture, QueuePosture::Join);
}

#[tokio::test]
async fn test_high_urgency_market_takes_liquidity() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_submit_mock()
        .withf(|r| r.order_type == OrderType::Market && r.limit_price.is_none())
        .times(1)
        .returning(accept);
    let sink = Arc::new(InMemoryTelemetrySink::new());

    let intent = ExecutionIntent::market("INFY", OrderSide::Sell, 10, tight_book())
        .with_urgency(Urgency::High);
    orchestrator(gateway, Arc::clone(&sink))
        .execute_intent(intent)
        .await
        .unwrap();

    assert_eq!(sink.records()[0].queue_posture, QueuePosture::Take);
}

#[tokio::test]
async fn test_wide_spread_overrides_high_urgency() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_submit_mock()
        .withf(|r| r.order_type == OrderType::Limit && r.limit_price == Some(dec!(100)))
        .times(1)
        .returning(accept);
    let sink = Arc::new(InMemoryTelemetrySink::new());

    let intent = ExecutionIntent::market("INFY", OrderSide::Buy, 10, wide_book())
        .with_urgency(Urgency::High);
    orchestrator(gateway, Arc::clone(&sink))
        .execute_intent(intent)
        .await
        .unwrap();

    assert_eq!(sink.records()[0].queue_posture, QueuePosture::Neutral);
}

#[tokio::test]
async fn test_each_attempt_gets_fresh_client_order_id() {
    let mut gateway = MockGateway::new();
    let mut seq = mockall::Sequence::new();
    gateway
        .expect_submit_mock()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Box::pin(async { Err(GatewayError::new("connection reset")) }));
    gateway
        .expect_submit_mock()
        .times(1)
        .in_sequence(&mut seq)
        .returning(accept);
    let sink = Arc::new(InMemoryTelemetrySink::new());

    let intent = ExecutionIntent::market("INFY", OrderSide::Buy, 10, tight_book());
    let result = orchestrator(gateway, Arc::clone(&sink))
        .execute_intent(intent)
        .await
        .unwrap();

    assert_eq!(result.children[0].attempts, 2);
    let order_id = result.children[0].order_id.clone().unwrap();
    assert!(order_id.as_str().starts_with("mock-"));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_gateway() {
    let mut gateway = MockGateway::new();
    gateway.expect_submit_mock().never();
    let sink = Arc::new(InMemoryTelemetrySink::new());

    let intent = ExecutionIntent::market("INFY", OrderSide::Buy, 10, tight_book())
        .with_algorithm("SNIPER");
    let err = orchestrator(gateway, Arc::clone(&sink))
        .execute_intent(intent)
        .await
        .unwrap_err();

    assert_eq!(err.context_value("field"), Some("algorithm"));
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_skips_unstarted_children() {
    let mut gateway = MockGateway::new();
    gateway.expect_submit_mock().times(1).returning(accept);
    let sink = Arc::new(InMemoryTelemetrySink::new());
    let orch = orchestrator(gateway, Arc::clone(&sink));

    let intent = ExecutionIntent::market("INFY", OrderSide::Buy, 30, tight_book())
        .with_algorithm("TWAP")
        .with_max_children(3)
        .with_randomize_slices(false);
    let request = ExecutionRequest::new(intent).unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let result = orch.execute_with_cancel(request, cancel).await.unwrap();

    let states: Vec<ChildState> = result.children.iter().map(|c| c.state).collect();
    assert_eq!(
        states,
        vec![ChildState::Succeeded, ChildState::Cancelled, ChildState::Cancelled]
    );
    assert!(result.cancelled);
    assert_eq!(result.status, ExecutionStatus::Partial);
    assert_eq!(result.filled_quantity, 10);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_cancel_before_start_submits_nothing() {
    let mut gateway = MockGateway::new();
    gateway.expect_submit_mock().never();
    let sink = Arc::new(InMemoryTelemetrySink::new());
    let orch = orchestrator(gateway, Arc::clone(&sink));

    let intent = ExecutionIntent::market("INFY", OrderSide::Buy, 10, tight_book());
    let request = ExecutionRequest::new(intent).unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = orch.execute_with_cancel(request, cancel).await.unwrap();

    assert_eq!(result.children[0].state, ChildState::Cancelled);
    assert_eq!(result.status, ExecutionStatus::Failed);
    assert!(sink.is_empty());
}
