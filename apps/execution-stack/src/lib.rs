// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Execution Stack - Rust Core Library
//!
//! Turns a parent execution request into routed, sized, scheduled child
//! orders, submits them through a broker port with bucketed retries, and
//! records one execution-quality line per attempt.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure components, no I/O
//!   - `order_execution`: Request validation, child lifecycle, result
//!   - `order_routing`: Queue posture and effective price
//!   - `execution_tactics`: Slicing planner (IMMEDIATE, IS, TWAP, VWAP, POV)
//!   - `market_impact`: Pre-trade slippage estimate
//!   - `retry_policy`: Error buckets and backoff
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `BrokerPort`, `MarketDataPort`, `TelemetrySink`
//!   - `use_cases`: `ExecutionOrchestrator`
//!   - `services`: `TcaReport`
//!
//! - **Infrastructure**: Adapters
//!   - `broker`: Paper broker
//!   - `market_data`: Static snapshots
//!   - `telemetry`: JSON Lines recorder and per-mode registry

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Crate-level error type.
pub mod error;

/// Logging and metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_execution::{
    Algorithm, BookContext, ChildOutcome, ChildState, ExecutionIntent, ExecutionRequest,
    ExecutionResult, ExecutionStatus, OrderSide, OrderType, Urgency,
};
pub use domain::retry_policy::ErrorBucket;
pub use domain::shared::{Symbol, TraceId, TradingMode};

// Application re-exports
pub use application::ports::{BrokerPort, MarketDataPort, TelemetryRecord, TelemetrySink};
pub use application::services::TcaReport;
pub use application::use_cases::{ExecutionOrchestrator, OrchestratorConfig};

// Infrastructure re-exports
pub use infrastructure::broker::PaperBroker;
pub use infrastructure::market_data::StaticMarketData;
pub use infrastructure::telemetry::{
    InMemoryTelemetrySink, JsonlTelemetryRecorder, TelemetryRegistry,
};

pub use config::Config;
pub use error::{ErrorCode, ExecutionError};
