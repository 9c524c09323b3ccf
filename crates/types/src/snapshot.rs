//! Point-in-time views of pool and metrics state
//!
//! Snapshots are taken under the pool's lock, so the fields within one
//! snapshot are always mutually consistent.

use serde::{Deserialize, Serialize};

/// Capacity state of the pool at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Total capacity fixed at construction
    pub total: u64,
    /// Units currently available for allocation
    pub available: u64,
}

impl PoolSnapshot {
    /// Fraction of capacity currently allocated, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (1.0 - self.available as f64 / self.total as f64) * 100.0
    }
}

/// Aggregate request statistics at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Every allocation attempt, accepted or denied
    pub total_requests: u64,
    /// Attempts that were granted capacity
    pub successful_requests: u64,
    /// `successful_requests / total_requests * 100`, 0 when no requests
    pub success_rate: f64,
    /// Mean recorded wait in milliseconds, 0 when no samples
    pub avg_wait_ms: f64,
}
