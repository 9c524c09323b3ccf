//! Per-container request/hold/release loops

use std::sync::Arc;
use std::time::Duration;

use capsim_config::WorkloadConfig;
use capsim_events::{AppEvent, EventEmitter, EventSender, WorkerEvent};
use capsim_pool::ResourcePool;
use capsim_types::WorkerSummary;
use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Spawns and owns the simulated container workers
pub struct WorkloadGenerator {
    pool: Arc<ResourcePool>,
    config: WorkloadConfig,
    event_sender: EventSender,
}

impl WorkloadGenerator {
    /// Create a generator over a shared pool handle.
    #[must_use]
    pub fn new(pool: Arc<ResourcePool>, config: WorkloadConfig, event_sender: EventSender) -> Self {
        Self {
            pool,
            config,
            event_sender,
        }
    }

    /// Spawn one worker task per configured container.
    ///
    /// Each handle resolves to the worker's summary once it has observed the
    /// stop signal and exited its loop.
    #[must_use]
    pub fn spawn_all(&self, stop: &watch::Receiver<bool>) -> Vec<JoinHandle<WorkerSummary>> {
        (0..self.config.workers)
            .map(|i| {
                let worker = format!("container-{i}");
                tokio::spawn(run_worker(
                    worker,
                    Arc::clone(&self.pool),
                    self.config.clone(),
                    stop.clone(),
                    self.event_sender.clone(),
                ))
            })
            .collect()
    }
}

/// Convenience wrapper: build a generator and spawn its workers.
#[must_use]
pub fn spawn_workers(
    pool: Arc<ResourcePool>,
    config: WorkloadConfig,
    stop: &watch::Receiver<bool>,
    event_sender: EventSender,
) -> Vec<JoinHandle<WorkerSummary>> {
    WorkloadGenerator::new(pool, config, event_sender).spawn_all(stop)
}

async fn run_worker(
    worker: String,
    pool: Arc<ResourcePool>,
    config: WorkloadConfig,
    mut stop: watch::Receiver<bool>,
    events: EventSender,
) -> WorkerSummary {
    events.emit(AppEvent::Worker(WorkerEvent::Started {
        worker: worker.clone(),
    }));

    let mut iterations = 0u64;

    // The stop flag is checked only here, between iterations. An accepted
    // allocation is always released before the next check, so shutdown can
    // never strand capacity.
    while !*stop.borrow_and_update() {
        let (amount, hold, delay) = draw_iteration(&config);

        if pool.allocate(&worker, amount) {
            tokio::time::sleep(hold).await;
            if let Err(err) = pool.release(&worker, amount) {
                events.emit_error(format!("{worker}: release failed: {err}"));
            }
        }

        iterations += 1;
        tokio::time::sleep(delay).await;
    }

    events.emit(AppEvent::Worker(WorkerEvent::Stopped {
        worker: worker.clone(),
        iterations,
    }));

    WorkerSummary { worker, iterations }
}

/// Draw the randomized parameters for one iteration.
///
/// The rng is task-local and never crosses an await point.
fn draw_iteration(config: &WorkloadConfig) -> (u64, Duration, Duration) {
    let mut rng = rand::rng();
    (
        rng.random_range(config.amount_min..=config.amount_max),
        Duration::from_millis(rng.random_range(config.hold_min_ms..=config.hold_max_ms)),
        Duration::from_millis(rng.random_range(config.delay_min_ms..=config.delay_max_ms)),
    )
}
