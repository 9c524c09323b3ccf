//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// capsim - concurrent shared-resource pool simulator
#[derive(Parser)]
#[command(name = "capsim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simulate containers competing for a finite resource pool")]
#[command(long_about = None)]
pub struct Cli {
    /// Total pool capacity in units
    #[arg(long, value_name = "UNITS")]
    pub capacity: Option<u64>,

    /// Number of simulated container workers
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Run duration in seconds
    #[arg(long, value_name = "SECS")]
    pub duration: Option<u64>,

    /// Smallest amount a worker may request
    #[arg(long, value_name = "UNITS")]
    pub amount_min: Option<u64>,

    /// Largest amount a worker may request
    #[arg(long, value_name = "UNITS")]
    pub amount_max: Option<u64>,

    /// Shortest hold time for granted capacity
    #[arg(long, value_name = "MS")]
    pub hold_min_ms: Option<u64>,

    /// Longest hold time for granted capacity
    #[arg(long, value_name = "MS")]
    pub hold_max_ms: Option<u64>,

    /// Shortest pause between a worker's requests
    #[arg(long, value_name = "MS")]
    pub delay_min_ms: Option<u64>,

    /// Longest pause between a worker's requests
    #[arg(long, value_name = "MS")]
    pub delay_max_ms: Option<u64>,

    /// Render a utilization chart artifact when the run ends
    #[arg(long)]
    pub plot: bool,

    /// Directory for chart artifacts
    #[arg(long, value_name = "DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Output the final report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging and per-sample output
    #[arg(long)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
