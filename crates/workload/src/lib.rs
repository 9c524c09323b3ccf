#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Workload generation for capsim
//!
//! Drives the resource pool with independent simulated containers. Each
//! worker is a cancellable tokio task running a request/hold/release loop
//! with task-local randomness; the stop signal is a watch channel observed
//! only at iteration boundaries, so no allocation is left dangling.

pub mod generator;

pub use generator::{spawn_workers, WorkloadGenerator};
