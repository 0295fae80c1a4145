//! Market Impact Bounded Context
//!
//! Pre-trade cost estimation for a single child order. Estimators are pure
//! and stateless; the orchestrator only sees the [`ImpactEstimator`] trait.

pub mod services;
pub mod value_objects;

pub use services::{ImpactEstimator, ProxyImpactModel};
pub use value_objects::{ImpactEstimate, ImpactModelConfig};
