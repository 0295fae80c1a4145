//! Market Impact Value Objects

mod impact_estimate;
mod impact_model_config;

pub use impact_estimate::ImpactEstimate;
pub use impact_model_config::ImpactModelConfig;
