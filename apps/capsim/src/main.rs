//! capsim - concurrent shared-resource pool simulator
//!
//! This is the CLI application that wires the pool, workload, and reporting
//! crates together, drives the run for the configured duration, and prints
//! the final performance report.

mod cli;
mod display;
mod error;
mod events;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use capsim_config::Config;
use capsim_events::{AppEvent, EventEmitter, ReportEvent};
use capsim_pool::ResourcePool;
use capsim_report::{artifact_path, remove_stale_artifacts, render_utilization_chart};
use capsim_report::{run_sampler, UtilizationHistory};
use capsim_types::FinalReport;
use capsim_workload::spawn_workers;
use clap::Parser;
use std::process;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::select;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Upper bound on waiting for workers after the stop signal
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    init_tracing(json_mode, cli.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    let json_mode = cli.json;

    info!("Starting capsim v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli);

    // Fatal misconfiguration aborts before any worker is spawned.
    config.validate()?;

    let (event_tx, mut event_rx) = capsim_events::channel();
    let colors_enabled = !json_mode && console::Term::stdout().features().colors_supported();
    let handler = EventHandler::new(colors_enabled, cli.debug, json_mode);

    // Sweep chart artifacts from earlier runs; failure is a warning only.
    match remove_stale_artifacts(&config.report.artifact_dir) {
        Ok(0) => {}
        Ok(count) => event_tx.emit(AppEvent::Report(ReportEvent::StaleArtifactsRemoved {
            count,
        })),
        Err(e) => event_tx.emit_warning_with_context("stale artifact cleanup failed", e.to_string()),
    }

    let pool = Arc::new(ResourcePool::with_events(
        config.pool.total_capacity,
        event_tx.clone(),
    ));
    let (stop_tx, stop_rx) = watch::channel(false);

    let history = Arc::new(Mutex::new(UtilizationHistory::new(
        config.report.history_samples,
    )));
    let sampler = tokio::spawn(run_sampler(
        Arc::clone(&pool),
        Arc::clone(&history),
        Duration::from_millis(config.report.sample_interval_ms),
        stop_rx.clone(),
        event_tx.clone(),
    ));

    let workers = spawn_workers(
        Arc::clone(&pool),
        config.workload.clone(),
        &stop_rx,
        event_tx.clone(),
    );

    let started = Instant::now();
    let run_duration = Duration::from_secs(config.workload.run_duration_secs);

    // Drive the run: render events while the clock runs; Ctrl-C ends early.
    let mut deadline = Box::pin(tokio::time::sleep(run_duration));
    let mut interrupt = Box::pin(tokio::signal::ctrl_c());
    loop {
        select! {
            () = &mut deadline => break,
            _ = &mut interrupt => {
                info!("Interrupt received, shutting down early");
                break;
            }
            event = event_rx.recv() => {
                if let Some(event) = event {
                    handler.handle_event(&event);
                }
            }
        }
    }

    // Cooperative shutdown: flip the signal, then wait with a bound.
    let _ = stop_tx.send(true);
    drop(event_tx);

    let mut summaries = Vec::new();
    for handle in workers {
        match timeout(JOIN_TIMEOUT, handle).await {
            Ok(Ok(summary)) => summaries.push(summary),
            Ok(Err(e)) => warn!("Worker task failed: {e}"),
            Err(_) => warn!("Worker did not stop within {JOIN_TIMEOUT:?}"),
        }
    }
    if timeout(JOIN_TIMEOUT, sampler).await.is_err() {
        warn!("Sampler did not stop within {JOIN_TIMEOUT:?}");
    }

    // Drain events emitted during shutdown.
    while let Ok(event) = event_rx.try_recv() {
        handler.handle_event(&event);
    }

    if config.report.plot {
        let series = history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .series();
        let path = artifact_path(&config.report.artifact_dir);
        match render_utilization_chart(&series, &path) {
            Ok(()) => handler.handle_event(&AppEvent::Report(ReportEvent::ArtifactWritten {
                path: path.display().to_string(),
            })),
            Err(e) => warn!("Chart rendering failed: {e}"),
        }
    }

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let report = FinalReport::compose(pool.snapshot(), pool.metrics(), duration_ms, summaries);

    let renderer = OutputRenderer::new(json_mode);
    renderer.render_final_report(&report)?;

    info!("Run completed");
    Ok(())
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(capacity) = cli.capacity {
        config.pool.total_capacity = capacity;
    }
    if let Some(workers) = cli.workers {
        config.workload.workers = workers;
    }
    if let Some(duration) = cli.duration {
        config.workload.run_duration_secs = duration;
    }
    if let Some(amount_min) = cli.amount_min {
        config.workload.amount_min = amount_min;
    }
    if let Some(amount_max) = cli.amount_max {
        config.workload.amount_max = amount_max;
    }
    if let Some(hold_min_ms) = cli.hold_min_ms {
        config.workload.hold_min_ms = hold_min_ms;
    }
    if let Some(hold_max_ms) = cli.hold_max_ms {
        config.workload.hold_max_ms = hold_max_ms;
    }
    if let Some(delay_min_ms) = cli.delay_min_ms {
        config.workload.delay_min_ms = delay_min_ms;
    }
    if let Some(delay_max_ms) = cli.delay_max_ms {
        config.workload.delay_max_ms = delay_max_ms;
    }
    if cli.plot {
        config.report.plot = true;
    }
    if let Some(artifact_dir) = &cli.artifact_dir {
        config.report.artifact_dir.clone_from(artifact_dir);
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled: bool) {
    if json_mode {
        // JSON mode: suppress all console logging to avoid contaminating output
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
        return;
    }

    let default_filter = if debug_enabled {
        "debug,capsim=debug"
    } else {
        "warn,capsim=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
