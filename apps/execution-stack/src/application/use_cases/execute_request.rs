//! Execute Request Use Case
//!
//! Runs one parent request to completion: route once, plan once, then for
//! each child estimate, submit, retry per bucket and record every attempt.
//! Children run strictly in index order.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::application::ports::{
    BrokerPort, RecordStatus, SubmitOrderRequest, TelemetryRecord, TelemetrySink,
};
use crate::config::Config;
use crate::domain::execution_tactics::{ChildOrderPlan, SlicingConfig, SlicingPlanner};
use crate::domain::market_impact::{ImpactEstimate, ImpactEstimator};
use crate::domain::order_execution::{
    Attempt, AttemptOutcome, ChildOutcome, ChildState, ChildTracker, ExecutionIntent,
    ExecutionRequest, ExecutionResult,
};
use crate::domain::order_routing::{OrderRouter, RouterConfig, RoutingDecision};
use crate::domain::retry_policy::{ErrorBucket, RetryConfig, RetryDecision, RetryPolicy};
use crate::domain::shared::{ClientOrderId, TraceId};
use crate::error::ExecutionError;
use crate::observability;

/// Orchestrator settings assembled from configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Router parameters.
    pub routing: RouterConfig,
    /// Planner parameters.
    pub slicing: SlicingConfig,
    /// Retry parameters.
    pub retry: RetryConfig,
    /// Deadline for a single submission attempt.
    pub attempt_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            routing: RouterConfig::default(),
            slicing: SlicingConfig::default(),
            retry: RetryConfig::default(),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

impl OrchestratorConfig {
    /// Extract orchestrator settings from the application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            routing: config.routing.clone(),
            slicing: config.slicing.clone(),
            retry: config.retry.clone(),
            attempt_timeout: config.execution.attempt_timeout(),
        }
    }
}

/// Per-request state shared by all children.
struct ParentContext<'a> {
    trace_id: &'a TraceId,
    request: &'a ExecutionRequest,
    decision: &'a RoutingDecision,
    children: u32,
    telemetry_failures: u32,
}

/// Execution orchestrator.
///
/// Stateless between requests; share it behind an `Arc` to run distinct
/// parents concurrently.
pub struct ExecutionOrchestrator<B, T, I>
where
    B: BrokerPort,
    T: TelemetrySink,
    I: ImpactEstimator,
{
    broker: Arc<B>,
    telemetry: Arc<T>,
    estimator: Arc<I>,
    router: OrderRouter,
    planner: SlicingPlanner,
    retry: RetryPolicy,
    attempt_timeout: Duration,
}

impl<B, T, I> ExecutionOrchestrator<B, T, I>
where
    B: BrokerPort,
    T: TelemetrySink,
    I: ImpactEstimator,
{
    /// Create a new orchestrator.
    pub fn new(
        broker: Arc<B>,
        telemetry: Arc<T>,
        estimator: Arc<I>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            broker,
            telemetry,
            estimator,
            router: OrderRouter::new(config.routing),
            planner: SlicingPlanner::new(config.slicing),
            retry: RetryPolicy::new(&config.retry),
            attempt_timeout: config.attempt_timeout,
        }
    }

    /// Validate an intent and execute it.
    ///
    /// # Errors
    ///
    /// Returns `PRECONDITION_VIOLATION` if the intent is structurally
    /// invalid. Nothing is submitted or recorded in that case.
    pub async fn execute_intent(
        &self,
        intent: ExecutionIntent,
    ) -> Result<ExecutionResult, ExecutionError> {
        let request = ExecutionRequest::new(intent).map_err(|e| {
            tracing::warn!(error = %e, "Execution request rejected");
            ExecutionError::from(e)
        })?;
        self.execute(request).await
    }

    /// Execute a request to completion.
    ///
    /// Broker failures never produce an error; they are reported per child.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` only if a child lifecycle invariant breaks.
    pub async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, ExecutionError> {
        self.execute_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Execute a request, stopping early when `cancel` fires.
    ///
    /// Cancellation is observed between children and while waiting for a
    /// child's scheduled offset. A child that has started submitting runs to
    /// a terminal state; children not yet started are marked cancelled.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` only if a child lifecycle invariant breaks.
    pub async fn execute_with_cancel(
        &self,
        request: ExecutionRequest,
        cancel: CancellationToken,
    ) -> Result<ExecutionResult, ExecutionError> {
        let trace_id = TraceId::generate();
        let span = tracing::info_span!(
            "execution",
            trace_id = %trace_id,
            symbol = %request.symbol(),
            side = %request.side(),
            algorithm = %request.policy().algorithm,
            quantity = request.quantity(),
            source = request.tag("source").unwrap_or("-"),
        );

        self.run(trace_id, &request, &cancel).instrument(span).await
    }

    async fn run(
        &self,
        trace_id: TraceId,
        request: &ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecutionError> {
        let started = Instant::now();
        let policy = request.policy();

        let decision = self.router.route(
            request.side(),
            policy.urgency,
            request.order_type(),
            request.limit_price(),
            request.book(),
        );
        let plans = self.planner.plan_request(request);

        tracing::info!(
            posture = %decision.posture,
            order_type = %decision.order_type,
            limit_price = ?decision.limit_price,
            children = plans.len(),
            "Execution planned"
        );

        let mut ctx = ParentContext {
            trace_id: &trace_id,
            request,
            decision: &decision,
            children: plans.len() as u32,
            telemetry_failures: 0,
        };

        let mut outcomes = Vec::with_capacity(plans.len());
        let mut cancelled = false;

        for plan in &plans {
            if !cancelled && !plan.offset.is_zero() {
                let due = started + plan.offset;
                tokio::select! {
                    () = cancel.cancelled() => cancelled = true,
                    () = tokio::time::sleep_until(due) => {}
                }
            }
            if cancelled || cancel.is_cancelled() {
                cancelled = true;
                outcomes.push(ChildOutcome::cancelled(plan.index, plan.quantity));
                continue;
            }

            outcomes.push(self.run_child(&mut ctx, plan).await?);
        }

        if cancelled {
            tracing::warn!(
                skipped = outcomes.iter().filter(|c| c.state == ChildState::Cancelled).count(),
                "Execution cancelled"
            );
        }

        let telemetry_failures = ctx.telemetry_failures;
        let result = ExecutionResult::new(trace_id, outcomes, cancelled, telemetry_failures);
        observability::record_execution_result(result.status.as_str(), result.filled_quantity);

        tracing::info!(
            status = %result.status,
            filled = result.filled_quantity,
            attempts = result.total_attempts(),
            telemetry_failures,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Execution finished"
        );

        Ok(result)
    }

    async fn run_child(
        &self,
        ctx: &mut ParentContext<'_>,
        plan: &ChildOrderPlan,
    ) -> Result<ChildOutcome, ExecutionError> {
        let request = ctx.request;
        let mut tracker = ChildTracker::new(plan.index);

        let impact = self.estimator.estimate(
            request.book(),
            request.side(),
            request.policy().participation_rate,
            plan.quantity,
            request.quantity(),
        );
        tracker.advance(ChildState::Estimated)?;
        observability::record_expected_slippage(
            request.side().as_str(),
            impact.expected_slippage.to_f64().unwrap_or_default(),
        );

        let mut attempt_no = 1;
        loop {
            tracker.advance(ChildState::Submitting)?;
            let attempt = self.submit_once(ctx, plan, attempt_no).await;
            self.record(ctx, plan, &impact, &attempt).await;

            match attempt.outcome {
                AttemptOutcome::Placed { order_id } => {
                    tracker.advance(ChildState::Succeeded)?;
                    tracing::debug!(
                        child = plan.index,
                        attempt = attempt_no,
                        order_id = %order_id,
                        "Child placed"
                    );
                    return Ok(ChildOutcome {
                        index: plan.index,
                        quantity: plan.quantity,
                        state: tracker.state(),
                        attempts: attempt_no,
                        order_id: Some(order_id),
                        error_bucket: None,
                        error: None,
                        impact: Some(impact),
                    });
                }
                AttemptOutcome::Error { bucket, detail } => {
                    match self.retry.decide(bucket, attempt_no) {
                        RetryDecision::Retry {
                            next_attempt,
                            delay,
                        } => {
                            tracker.advance(ChildState::RetryPending)?;
                            observability::record_retry(bucket.as_str());
                            tracing::warn!(
                                child = plan.index,
                                attempt = attempt_no,
                                bucket = %bucket,
                                delay_ms = delay.as_millis() as u64,
                                error = %detail,
                                "Child attempt failed, retrying"
                            );
                            tokio::time::sleep(delay).await;
                            attempt_no = next_attempt;
                        }
                        RetryDecision::GiveUp => {
                            tracker.advance(ChildState::Failed)?;
                            tracing::error!(
                                child = plan.index,
                                attempts = attempt_no,
                                bucket = %bucket,
                                error = %detail,
                                "Child failed"
                            );
                            return Ok(ChildOutcome {
                                index: plan.index,
                                quantity: plan.quantity,
                                state: tracker.state(),
                                attempts: attempt_no,
                                order_id: None,
                                error_bucket: Some(bucket),
                                error: Some(detail),
                                impact: Some(impact),
                            });
                        }
                    }
                }
            }
        }
    }

    async fn submit_once(
        &self,
        ctx: &ParentContext<'_>,
        plan: &ChildOrderPlan,
        attempt: u32,
    ) -> Attempt {
        let request = ctx.request;
        let submit = SubmitOrderRequest {
            client_order_id: ClientOrderId::generate(),
            symbol: request.symbol().clone(),
            side: request.side(),
            quantity: plan.quantity,
            order_type: ctx.decision.order_type,
            limit_price: ctx.decision.limit_price,
        };

        let started = Instant::now();
        let submission = tokio::time::timeout(self.attempt_timeout, self.broker.submit(submit));
        let outcome = match submission.await {
            Ok(Ok(ack)) => AttemptOutcome::Placed {
                order_id: ack.broker_order_id,
            },
            Ok(Err(e)) => AttemptOutcome::Error {
                bucket: self.retry.classify(&e.detail),
                detail: e.detail,
            },
            Err(_) => AttemptOutcome::Error {
                bucket: ErrorBucket::Transient,
                detail: format!(
                    "submission timeout after {} ms",
                    self.attempt_timeout.as_millis()
                ),
            },
        };
        let latency = started.elapsed();

        let (status, bucket) = match &outcome {
            AttemptOutcome::Placed { .. } => ("placed", "none"),
            AttemptOutcome::Error { bucket, .. } => ("error", bucket.as_str()),
        };
        observability::record_attempt(status, bucket, latency.as_secs_f64());

        Attempt {
            child_index: plan.index,
            attempt,
            timestamp: Utc::now(),
            latency_ms: latency.as_millis() as u64,
            outcome,
        }
    }

    async fn record(
        &self,
        ctx: &mut ParentContext<'_>,
        plan: &ChildOrderPlan,
        impact: &ImpactEstimate,
        attempt: &Attempt,
    ) {
        let request = ctx.request;
        let (status, order_id, error_bucket, error) = match &attempt.outcome {
            AttemptOutcome::Placed { order_id } => {
                (RecordStatus::Placed, Some(order_id.clone()), None, None)
            }
            AttemptOutcome::Error { bucket, detail } => {
                (RecordStatus::Error, None, Some(*bucket), Some(detail.clone()))
            }
        };

        let record = TelemetryRecord {
            timestamp: attempt.timestamp,
            trace_id: ctx.trace_id.clone(),
            symbol: request.symbol().clone(),
            side: request.side(),
            algorithm: request.policy().algorithm,
            child_index: plan.index,
            children: ctx.children,
            quantity: plan.quantity,
            arrival_price: request.book().last,
            limit_price: ctx.decision.limit_price,
            expected_slippage: impact.expected_slippage,
            impact_estimate: impact.impact_score,
            queue_posture: ctx.decision.posture,
            route: ctx.decision.route.clone(),
            latency_ms: attempt.latency_ms,
            attempt: attempt.attempt,
            status,
            order_id,
            error_bucket,
            error,
        };

        if let Err(e) = self.telemetry.append(&record).await {
            ctx.telemetry_failures += 1;
            observability::record_telemetry_failure();
            tracing::error!(
                child = plan.index,
                attempt = attempt.attempt,
                error = %e,
                "Failed to write execution quality record"
            );
        }
    }
}
