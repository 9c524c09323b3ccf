//! Integration tests for error types

#[cfg(test)]
mod tests {
    use capsim_errors::*;

    #[test]
    fn test_error_conversion() {
        let pool_err = PoolError::ReleaseOverflow {
            consumer: "container-0".into(),
            amount: 50,
            available: 90,
            total: 100,
        };
        let err: Error = pool_err.into();
        assert!(matches!(err, Error::Pool(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid {
            message: "total_capacity must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config: total_capacity must be positive"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = ReportError::ArtifactIo {
            path: "./utilization-20260101-000000.svg".into(),
            message: "permission denied".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_release_overflow_message_names_the_amounts() {
        let err = PoolError::ReleaseOverflow {
            consumer: "container-3".into(),
            amount: 30,
            available: 80,
            total: 100,
        };
        let text = err.to_string();
        assert!(text.contains("container-3"));
        assert!(text.contains("30"));
        assert!(text.contains("100"));
    }
}
