//! Report type definitions for simulation runs

use crate::snapshot::{MetricsSnapshot, PoolSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final report printed when a run completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalReport {
    /// Capacity state after all workers stopped
    pub pool: PoolSnapshot,
    /// Aggregate request statistics for the whole run
    pub metrics: MetricsSnapshot,
    /// Wall-clock run length
    pub duration_ms: u64,
    /// Per-worker iteration counts, in worker order
    pub workers: Vec<WorkerSummary>,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

impl FinalReport {
    /// Assemble a report from end-of-run snapshots.
    #[must_use]
    pub fn compose(
        pool: PoolSnapshot,
        metrics: MetricsSnapshot,
        duration_ms: u64,
        workers: Vec<WorkerSummary>,
    ) -> Self {
        Self {
            pool,
            metrics,
            duration_ms,
            workers,
            generated_at: Utc::now(),
        }
    }
}

/// Per-worker summary returned when a workload task exits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSummary {
    /// Worker name, e.g. `container-3`
    pub worker: String,
    /// Completed allocate/release iterations
    pub iterations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{MetricsSnapshot, PoolSnapshot};

    #[test]
    fn final_report_serializes_with_stable_field_names() {
        let report = FinalReport::compose(
            PoolSnapshot {
                total: 100,
                available: 100,
            },
            MetricsSnapshot {
                total_requests: 10,
                successful_requests: 8,
                success_rate: 80.0,
                avg_wait_ms: 0.25,
            },
            30_000,
            vec![WorkerSummary {
                worker: "container-0".into(),
                iterations: 10,
            }],
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pool"]["available"], 100);
        assert_eq!(json["metrics"]["success_rate"], 80.0);
        assert_eq!(json["duration_ms"], 30_000);
        assert_eq!(json["workers"][0]["worker"], "container-0");
    }
}
