#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for capsim
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (capsim.toml in the working directory)
//! - Environment variables (`CAPSIM_*`)
//! - CLI flags (applied by the app, highest precedence)

use capsim_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "capsim.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub workload: WorkloadConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Resource pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Total capacity units the pool starts with
    #[serde(default = "default_total_capacity")]
    pub total_capacity: u64,
}

/// Workload generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of simulated container workers
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// How long the simulation runs before shutdown
    #[serde(default = "default_run_duration_secs")]
    pub run_duration_secs: u64,
    /// Smallest amount a worker may request
    #[serde(default = "default_amount_min")]
    pub amount_min: u64,
    /// Largest amount a worker may request
    #[serde(default = "default_amount_max")]
    pub amount_max: u64,
    /// Hold-duration range while allocated capacity is "in use"
    #[serde(default = "default_hold_min_ms")]
    pub hold_min_ms: u64,
    #[serde(default = "default_hold_max_ms")]
    pub hold_max_ms: u64,
    /// Inter-arrival delay range between a worker's requests
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,
}

/// Reporting and artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Interval between utilization samples
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    /// Ring-buffer capacity for utilization history
    #[serde(default = "default_history_samples")]
    pub history_samples: usize,
    /// Render a utilization chart artifact at the end of the run
    #[serde(default)]
    pub plot: bool,
    /// Where chart artifacts are written and cleaned up
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
}

// Default implementations

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            total_capacity: 100,
        }
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            run_duration_secs: 30,
            amount_min: 5,
            amount_max: 20,
            hold_min_ms: 100,
            hold_max_ms: 500,
            delay_min_ms: 200,
            delay_max_ms: 1000,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            history_samples: 30, // keep the last 30 samples
            plot: false,
            artifact_dir: PathBuf::from("."),
        }
    }
}

// Default value functions for serde

fn default_total_capacity() -> u64 {
    100
}

fn default_workers() -> usize {
    5
}

fn default_run_duration_secs() -> u64 {
    30
}

fn default_amount_min() -> u64 {
    5
}

fn default_amount_max() -> u64 {
    20
}

fn default_hold_min_ms() -> u64 {
    100
}

fn default_hold_max_ms() -> u64 {
    500
}

fn default_delay_min_ms() -> u64 {
    200
}

fn default_delay_max_ms() -> u64 {
    1000
}

fn default_sample_interval_ms() -> u64 {
    1000
}

fn default_history_samples() -> usize {
    30
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from(".")
}

fn parse_env<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// Reads `capsim.toml` from the working directory when present,
    /// otherwise starts from hard-coded defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(capacity) = std::env::var("CAPSIM_CAPACITY") {
            self.pool.total_capacity = parse_env("CAPSIM_CAPACITY", &capacity)?;
        }

        if let Ok(workers) = std::env::var("CAPSIM_WORKERS") {
            self.workload.workers = parse_env("CAPSIM_WORKERS", &workers)?;
        }

        if let Ok(duration) = std::env::var("CAPSIM_DURATION_SECS") {
            self.workload.run_duration_secs = parse_env("CAPSIM_DURATION_SECS", &duration)?;
        }

        if let Ok(plot) = std::env::var("CAPSIM_PLOT") {
            self.report.plot = match plot.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CAPSIM_PLOT".to_string(),
                        value: plot,
                    }
                    .into())
                }
            };
        }

        if let Ok(dir) = std::env::var("CAPSIM_ARTIFACT_DIR") {
            self.report.artifact_dir = PathBuf::from(dir);
        }

        Ok(())
    }

    /// Validate the assembled configuration before any worker starts
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive capacity, zero workers, zero run
    /// duration, or malformed amount/hold/delay ranges.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pool.total_capacity == 0 {
            return Err(ConfigError::invalid("total_capacity must be positive").into());
        }
        if self.workload.workers == 0 {
            return Err(ConfigError::invalid("workers must be positive").into());
        }
        if self.workload.run_duration_secs == 0 {
            return Err(ConfigError::invalid("run_duration_secs must be positive").into());
        }
        if self.workload.amount_min == 0 {
            return Err(ConfigError::invalid("amount_min must be positive").into());
        }
        if self.workload.amount_min > self.workload.amount_max {
            return Err(ConfigError::invalid(format!(
                "amount range is inverted: {}..{}",
                self.workload.amount_min, self.workload.amount_max
            ))
            .into());
        }
        if self.workload.hold_min_ms > self.workload.hold_max_ms {
            return Err(ConfigError::invalid(format!(
                "hold range is inverted: {}..{}",
                self.workload.hold_min_ms, self.workload.hold_max_ms
            ))
            .into());
        }
        if self.workload.delay_min_ms > self.workload.delay_max_ms {
            return Err(ConfigError::invalid(format!(
                "delay range is inverted: {}..{}",
                self.workload.delay_min_ms, self.workload.delay_max_ms
            ))
            .into());
        }
        if self.report.sample_interval_ms == 0 {
            return Err(ConfigError::invalid("sample_interval_ms must be positive").into());
        }
        if self.report.history_samples == 0 {
            return Err(ConfigError::invalid("history_samples must be positive").into());
        }
        Ok(())
    }
}
