//! Request metrics accumulated alongside pool mutations
//!
//! The collector is owned by the pool and only ever touched while the pool's
//! lock is held, which is what keeps `total_requests`, `successful_requests`
//! and the wait samples consistent with the capacity counter.

use std::time::Duration;

use capsim_types::MetricsSnapshot;

/// Accumulates request totals and wait-time samples
#[derive(Debug, Default)]
pub struct MetricsCollector {
    total_requests: u64,
    successful_requests: u64,
    wait_times: Vec<Duration>,
}

impl MetricsCollector {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one allocation attempt.
    ///
    /// Every attempt counts toward the total; the wait sample is kept only
    /// for granted requests, matching what the final report averages over.
    pub fn record(&mut self, success: bool, wait: Duration) {
        self.total_requests += 1;
        if success {
            self.successful_requests += 1;
            self.wait_times.push(wait);
        }
    }

    /// Derive the aggregate statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let success_rate = if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64 * 100.0
        };

        let avg_wait_ms = if self.wait_times.is_empty() {
            0.0
        } else {
            let total: Duration = self.wait_times.iter().sum();
            total.as_secs_f64() * 1000.0 / self.wait_times.len() as f64
        };

        MetricsSnapshot {
            total_requests: self.total_requests,
            successful_requests: self.successful_requests,
            success_rate,
            avg_wait_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_reports_zeros() {
        let snap = MetricsCollector::new().snapshot();
        assert_eq!(snap.total_requests, 0);
        assert_eq!(snap.successful_requests, 0);
        assert!((snap.success_rate - 0.0).abs() < f64::EPSILON);
        assert!((snap.avg_wait_ms - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn success_rate_counts_denials() {
        let mut collector = MetricsCollector::new();
        collector.record(true, Duration::from_millis(2));
        collector.record(false, Duration::ZERO);
        collector.record(true, Duration::from_millis(4));
        collector.record(false, Duration::ZERO);

        let snap = collector.snapshot();
        assert_eq!(snap.total_requests, 4);
        assert_eq!(snap.successful_requests, 2);
        assert!((snap.success_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn avg_wait_is_mean_of_successful_samples() {
        let mut collector = MetricsCollector::new();
        collector.record(true, Duration::from_millis(10));
        collector.record(true, Duration::from_millis(20));
        // Denied attempts contribute no wait sample.
        collector.record(false, Duration::from_millis(500));

        let snap = collector.snapshot();
        assert!((snap.avg_wait_ms - 15.0).abs() < 1e-9);
    }
}
