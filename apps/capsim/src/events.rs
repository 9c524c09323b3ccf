//! Event handling and console rendering

use capsim_events::{AppEvent, EventLevel, GeneralEvent, PoolEvent, ReportEvent, WorkerEvent};
use chrono::Local;
use console::Style;

/// Renders incoming events as console lines and forwards them to tracing
pub struct EventHandler {
    colors_enabled: bool,
    debug: bool,
    /// Suppress console lines entirely (JSON mode)
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            debug,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&self, event: &AppEvent) {
        self.forward_to_tracing(event);
        if self.quiet {
            return;
        }

        match event {
            AppEvent::Pool(pool_event) => self.render_pool_event(pool_event),
            AppEvent::Worker(worker_event) => self.render_worker_event(worker_event),
            AppEvent::Report(report_event) => self.render_report_event(report_event),
            AppEvent::General(general_event) => self.render_general_event(general_event),
        }
    }

    fn render_pool_event(&self, event: &PoolEvent) {
        match event {
            PoolEvent::Allocated {
                consumer,
                amount,
                available,
            } => {
                self.line(
                    self.style_info(),
                    &format!("{consumer} allocated {amount} units | remaining {available}"),
                );
            }
            PoolEvent::Denied {
                consumer,
                amount,
                available,
            } => {
                self.line(
                    self.style_warn(),
                    &format!("{consumer} DENIED {amount} units | available {available}"),
                );
            }
            PoolEvent::Released {
                consumer,
                amount,
                available,
            } => {
                self.line(
                    self.style_info(),
                    &format!("{consumer} released {amount} units | now available {available}"),
                );
            }
        }
    }

    fn render_worker_event(&self, event: &WorkerEvent) {
        match event {
            WorkerEvent::Started { worker } => {
                self.line(self.style_dim(), &format!("{worker} started"));
            }
            WorkerEvent::Stopped { worker, iterations } => {
                self.line(
                    self.style_dim(),
                    &format!("{worker} stopped after {iterations} iterations"),
                );
            }
        }
    }

    fn render_report_event(&self, event: &ReportEvent) {
        match event {
            ReportEvent::UtilizationSampled {
                utilization,
                available,
            } => {
                // High-frequency chatter; only shown when asked for.
                if self.debug {
                    self.line(
                        self.style_dim(),
                        &format!("utilization {utilization:.1}% | available {available}"),
                    );
                }
            }
            ReportEvent::ArtifactWritten { path } => {
                self.line(self.style_info(), &format!("chart written to {path}"));
            }
            ReportEvent::StaleArtifactsRemoved { count } => {
                self.line(
                    self.style_dim(),
                    &format!("removed {count} stale chart artifact(s)"),
                );
            }
        }
    }

    fn render_general_event(&self, event: &GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => {
                let text = match context {
                    Some(context) => format!("warning: {message} ({context})"),
                    None => format!("warning: {message}"),
                };
                self.line(self.style_warn(), &text);
            }
            GeneralEvent::Error { message, details } => {
                let text = match details {
                    Some(details) => format!("error: {message}: {details}"),
                    None => format!("error: {message}"),
                };
                self.line(self.style_error(), &text);
            }
            GeneralEvent::OperationStarted { operation } => {
                self.line(self.style_dim(), &format!("{operation} started"));
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                let text = if *success {
                    format!("{operation} completed")
                } else {
                    format!("{operation} failed")
                };
                self.line(self.style_dim(), &text);
            }
        }
    }

    fn forward_to_tracing(&self, event: &AppEvent) {
        let meta = event.meta();
        let source = meta.source.as_str();
        match meta.level {
            EventLevel::Trace => tracing::trace!(source = %source, event = ?event),
            EventLevel::Debug => tracing::debug!(source = %source, event = ?event),
            EventLevel::Info => tracing::info!(source = %source, event = ?event),
            EventLevel::Warn => tracing::warn!(source = %source, event = ?event),
            EventLevel::Error => tracing::error!(source = %source, event = ?event),
        }
    }

    fn line(&self, style: Style, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        println!("{timestamp} {}", style.apply_to(message));
    }

    fn style_info(&self) -> Style {
        self.maybe(Style::new().green())
    }

    fn style_warn(&self) -> Style {
        self.maybe(Style::new().yellow())
    }

    fn style_error(&self) -> Style {
        self.maybe(Style::new().red().bold())
    }

    fn style_dim(&self) -> Style {
        self.maybe(Style::new().dim())
    }

    fn maybe(&self, style: Style) -> Style {
        if self.colors_enabled {
            style
        } else {
            Style::new()
        }
    }
}
