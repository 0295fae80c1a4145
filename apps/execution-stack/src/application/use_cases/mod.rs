//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod execute_request;

pub use execute_request::{ExecutionOrchestrator, OrchestratorConfig};
