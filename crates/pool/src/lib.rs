#![deny(clippy::pedantic, unsafe_code)]

//! Resource pool core for capsim
//!
//! This crate owns the shared capacity counter and the performance metrics
//! that travel with it. Admission control is immediate: a request is granted
//! or denied against the capacity available at the instant of the check,
//! never queued. All mutation happens inside one critical section per
//! operation, so the counter and the metrics fields always move together.

pub mod metrics;
pub mod pool;

pub use metrics::MetricsCollector;
pub use pool::ResourcePool;
