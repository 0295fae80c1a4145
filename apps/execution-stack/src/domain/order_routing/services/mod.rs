//! Order Routing Domain Services

mod order_router;

pub use order_router::OrderRouter;
