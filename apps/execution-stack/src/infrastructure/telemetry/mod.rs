//! Telemetry adapters.
//!
//! - `jsonl_recorder`: durable append-only stream, one file per mode
//! - `registry`: one shared recorder per mode per process
//! - `in_memory`: test sink

mod in_memory;
mod jsonl_recorder;
mod registry;

pub use in_memory::InMemoryTelemetrySink;
pub use jsonl_recorder::{JsonlTelemetryRecorder, read_records, stream_path};
pub use registry::TelemetryRegistry;
