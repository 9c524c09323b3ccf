//! Periodic utilization sampling

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use capsim_events::{AppEvent, EventEmitter, EventSender, ReportEvent};
use capsim_pool::ResourcePool;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::history::UtilizationHistory;

/// Sample pool utilization on an interval until the stop signal fires.
///
/// Runs as an independent task next to the workers. Each tick takes one
/// consistent pool snapshot, appends it to the shared history, and emits a
/// debug-level event for observers.
pub async fn run_sampler(
    pool: Arc<ResourcePool>,
    history: Arc<Mutex<UtilizationHistory>>,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
    events: EventSender,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = pool.snapshot();
                let utilization = snapshot.utilization();
                history
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(utilization);
                events.emit(AppEvent::Report(ReportEvent::UtilizationSampled {
                    utilization,
                    available: snapshot.available,
                }));
            }
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_samples_until_stopped() {
        let (event_tx, mut event_rx) = capsim_events::channel();
        let pool = Arc::new(ResourcePool::new(100));
        assert!(pool.allocate("container-0", 50));

        let history = Arc::new(Mutex::new(UtilizationHistory::new(30)));
        let (stop_tx, stop_rx) = watch::channel(false);

        let sampler = tokio::spawn(run_sampler(
            Arc::clone(&pool),
            Arc::clone(&history),
            Duration::from_millis(5),
            stop_rx,
            event_tx,
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        stop_tx.send(true).unwrap();
        sampler.await.unwrap();

        let recorded = history.lock().unwrap().series();
        assert!(!recorded.is_empty());
        assert!(recorded.iter().all(|&u| (u - 50.0).abs() < 1e-9));

        match event_rx.try_recv() {
            Ok(AppEvent::Report(ReportEvent::UtilizationSampled {
                utilization,
                available,
            })) => {
                assert!((utilization - 50.0).abs() < 1e-9);
                assert_eq!(available, 50);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
