//! Broker adapters.

mod paper;

pub use paper::PaperBroker;
