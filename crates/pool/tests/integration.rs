//! Integration tests for the resource pool
//!
//! These exercise the concurrency properties: no lost updates under heavy
//! interleaving, admission that never overdraws, and consistent metrics.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use capsim_pool::ResourcePool;
    use proptest::prelude::*;
    use rand::Rng;

    #[test]
    fn stress_no_lost_updates() {
        let pool = Arc::new(ResourcePool::new(1000));
        let threads: u64 = 8;
        let iterations: u64 = 1000;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    let worker = format!("container-{t}");
                    for i in 0..iterations {
                        // Deterministic amounts so the expected outcome is exact.
                        let amount = (i % 7) + 1;
                        if pool.allocate(&worker, amount) {
                            pool.release(&worker, amount).unwrap();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Everything allocated was released, so availability is exact.
        assert_eq!(pool.available(), 1000);

        let metrics = pool.metrics();
        assert_eq!(metrics.total_requests, threads * iterations);
        assert_eq!(metrics.successful_requests, threads * iterations);
    }

    #[test]
    fn concurrent_admission_never_overdraws() {
        // C=10 and four concurrent requests for 7: at most one can win.
        let pool = Arc::new(ResourcePool::new(10));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || pool.allocate(&format!("container-{t}"), 7))
            })
            .collect();

        let granted: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = granted.iter().filter(|&&g| g).count() as u64;

        assert!(successes <= 1, "combined grants exceeded capacity");
        assert_eq!(pool.available(), 10 - 7 * successes);
    }

    #[tokio::test]
    async fn scenario_five_workers_thousand_requests() {
        let pool = Arc::new(ResourcePool::new(100));

        let mut handles = Vec::new();
        for t in 0..5 {
            let pool = Arc::clone(&pool);
            handles.push(tokio::task::spawn_blocking(move || {
                let worker = format!("container-{t}");
                let mut rng = rand::rng();
                for _ in 0..200 {
                    let amount = rng.random_range(5..=20);
                    let granted = pool.allocate(&worker, amount);
                    assert!(pool.available() <= 100);
                    if granted {
                        pool.release(&worker, amount).unwrap();
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let metrics = pool.metrics();
        assert_eq!(metrics.total_requests, 1000);
        assert!(metrics.success_rate >= 0.0 && metrics.success_rate <= 100.0);
        assert_eq!(pool.available(), 100);
    }

    proptest! {
        #[test]
        fn availability_always_within_bounds(
            amounts in prop::collection::vec(1u64..50, 1..200)
        ) {
            let pool = ResourcePool::new(100);
            let mut outstanding: Vec<u64> = Vec::new();

            for (i, &amount) in amounts.iter().enumerate() {
                if pool.allocate("prop", amount) {
                    outstanding.push(amount);
                }
                prop_assert!(pool.available() <= 100);

                // Interleave some releases to move both directions.
                if i % 3 == 0 {
                    if let Some(returned) = outstanding.pop() {
                        pool.release("prop", returned).unwrap();
                    }
                }
            }

            let still_held: u64 = outstanding.iter().sum();
            prop_assert_eq!(pool.available(), 100 - still_held);
        }
    }
}
