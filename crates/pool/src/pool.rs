//! Shared capacity pool with immediate admission control

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use capsim_errors::{Error, PoolError};
use capsim_events::{EventEmitter, EventSender};
use capsim_types::{MetricsSnapshot, PoolSnapshot};

use crate::metrics::MetricsCollector;

/// Everything that must move as one atomic group lives behind one lock.
#[derive(Debug)]
struct PoolState {
    available: u64,
    metrics: MetricsCollector,
}

/// Finite shared resource pool consumed and released by workers
///
/// `allocate` and `release` are linearized by a single mutex; the only other
/// work performed per call is a non-blocking event send, so the critical
/// section never waits on I/O.
pub struct ResourcePool {
    total: u64,
    state: Mutex<PoolState>,
    event_sender: Option<EventSender>,
}

impl ResourcePool {
    /// Create a pool with the given total capacity and no event output.
    ///
    /// Capacity validation happens in config, before the pool exists.
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            state: Mutex::new(PoolState {
                available: total,
                metrics: MetricsCollector::new(),
            }),
            event_sender: None,
        }
    }

    /// Create a pool that reports every call on the event channel.
    #[must_use]
    pub fn with_events(total: u64, sender: EventSender) -> Self {
        Self {
            event_sender: Some(sender),
            ..Self::new(total)
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        // The critical section is pure arithmetic; a poisoned lock means a
        // panic elsewhere, not inconsistent counters.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempt to allocate `amount` units for `consumer`.
    ///
    /// The admission decision is made against the capacity available at the
    /// atomic instant of the check. A denial is immediate and final; the
    /// boolean is the sole business outcome. Every attempt, granted or not,
    /// counts toward the request metrics, and the lock-wait latency is
    /// recorded for granted requests.
    #[must_use = "the boolean is the admission decision"]
    pub fn allocate(&self, consumer: &str, amount: u64) -> bool {
        let start = Instant::now();

        let (granted, available) = {
            let mut state = self.lock();
            let wait = start.elapsed();
            if state.available >= amount {
                state.available -= amount;
                state.metrics.record(true, wait);
                (true, state.available)
            } else {
                state.metrics.record(false, wait);
                (false, state.available)
            }
        };

        if granted {
            self.emit_allocated(consumer, amount, available);
        } else {
            self.emit_denied(consumer, amount, available);
        }
        granted
    }

    /// Return `amount` units to the pool, yielding the new availability.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::ReleaseOverflow` if the release would push
    /// availability above total capacity; the pool is left unchanged.
    pub fn release(&self, consumer: &str, amount: u64) -> Result<u64, Error> {
        let available = {
            let mut state = self.lock();
            let new_available = state
                .available
                .checked_add(amount)
                .filter(|&a| a <= self.total)
                .ok_or_else(|| PoolError::ReleaseOverflow {
                    consumer: consumer.to_string(),
                    amount,
                    available: state.available,
                    total: self.total,
                })?;
            state.available = new_available;
            new_available
        };

        self.emit_released(consumer, amount, available);
        Ok(available)
    }

    /// Total capacity fixed at construction.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Units currently available.
    #[must_use]
    pub fn available(&self) -> u64 {
        self.lock().available
    }

    /// Consistent view of total and available capacity.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            total: self.total,
            available: self.lock().available,
        }
    }

    /// Percentage of capacity currently allocated.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        self.snapshot().utilization()
    }

    /// Consistent view of the request metrics.
    ///
    /// Takes the same lock as the mutators, so this is safe to call while
    /// workers are still active.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.lock().metrics.snapshot()
    }
}

impl EventEmitter for ResourcePool {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
