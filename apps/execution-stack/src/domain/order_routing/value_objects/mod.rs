//! Order Routing Value Objects

mod queue_posture;
mod router_config;
mod routing_decision;

pub use queue_posture::QueuePosture;
pub use router_config::RouterConfig;
pub use routing_decision::RoutingDecision;
