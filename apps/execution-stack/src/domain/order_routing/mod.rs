//! Order Routing Bounded Context
//!
//! Chooses queue posture and the effective order type and price once per
//! parent request. Single venue: every decision routes to `primary`.

pub mod services;
pub mod value_objects;

pub use services::OrderRouter;
pub use value_objects::{QueuePosture, RouterConfig, RoutingDecision};
