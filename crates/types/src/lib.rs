#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the capsim resource simulator
//!
//! This crate provides the shared data shapes used throughout the system:
//! pool and metrics snapshots, worker summaries, and the final run report.

pub mod reports;
pub mod snapshot;

pub use reports::{FinalReport, WorkerSummary};
pub use snapshot::{MetricsSnapshot, PoolSnapshot};
