//! Integration tests for config

#[cfg(test)]
mod tests {
    use capsim_config::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[pool]
total_capacity = 250

[workload]
workers = 8
run_duration_secs = 10
amount_min = 1
amount_max = 40

[report]
plot = true
history_samples = 60
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.pool.total_capacity, 250);
        assert_eq!(config.workload.workers, 8);
        assert_eq!(config.workload.run_duration_secs, 10);
        assert_eq!(config.workload.amount_min, 1);
        assert_eq!(config.workload.amount_max, 40);
        assert!(config.report.plot);
        assert_eq!(config.report.history_samples, 60);
        // Untouched sections keep their defaults.
        assert_eq!(config.workload.hold_min_ms, 100);
        assert_eq!(config.report.sample_interval_ms, 1000);
    }

    #[tokio::test]
    async fn test_load_config_partial_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[pool]\ntotal_capacity = 10").unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.pool.total_capacity, 10);
        assert_eq!(config.workload.workers, 5);
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[pool\ntotal_capacity = ").unwrap();

        assert!(Config::load_from_file(temp_file.path()).await.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pool.total_capacity, 100);
        assert_eq!(config.workload.workers, 5);
        assert_eq!(config.workload.run_duration_secs, 30);
        assert_eq!(config.workload.amount_min, 5);
        assert_eq!(config.workload.amount_max, 20);
        assert_eq!(config.workload.delay_min_ms, 200);
        assert_eq!(config.workload.delay_max_ms, 1000);
        assert!(!config.report.plot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // Clean up any existing env vars first
        std::env::remove_var("CAPSIM_CAPACITY");
        std::env::remove_var("CAPSIM_WORKERS");
        std::env::remove_var("CAPSIM_PLOT");

        std::env::set_var("CAPSIM_CAPACITY", "500");
        std::env::set_var("CAPSIM_WORKERS", "12");
        std::env::set_var("CAPSIM_PLOT", "true");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.pool.total_capacity, 500);
        assert_eq!(config.workload.workers, 12);
        assert!(config.report.plot);

        // Clean up
        std::env::remove_var("CAPSIM_CAPACITY");
        std::env::remove_var("CAPSIM_WORKERS");
        std::env::remove_var("CAPSIM_PLOT");
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("CAPSIM_CAPACITY", "not-a-number");

        let mut config = Config::default();
        assert!(config.merge_env().is_err());

        std::env::remove_var("CAPSIM_CAPACITY");
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.pool.total_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.workload.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_amount_range() {
        let mut config = Config::default();
        config.workload.amount_min = 30;
        config.workload.amount_max = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let mut config = Config::default();
        config.workload.amount_min = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_delay_range() {
        let mut config = Config::default();
        config.workload.delay_min_ms = 2000;
        assert!(config.validate().is_err());
    }
}
