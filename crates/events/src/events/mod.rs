//! Domain-driven event definitions
//!
//! Events are grouped by the subsystem that emits them. `AppEvent` is the
//! envelope carried on the channel; `meta()` derives routing metadata
//! (severity and source) from the event itself.

use serde::{Deserialize, Serialize};

use crate::meta::{EventLevel, EventMeta, EventSource};

mod general;
mod pool;
mod report;
mod worker;

pub use general::GeneralEvent;
pub use pool::PoolEvent;
pub use report::ReportEvent;
pub use worker::WorkerEvent;

/// Top-level event envelope carried on the event channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum AppEvent {
    Pool(PoolEvent),
    Worker(WorkerEvent),
    Report(ReportEvent),
    General(GeneralEvent),
}

impl AppEvent {
    /// Severity of this event for logging/rendering decisions.
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            AppEvent::Pool(event) => event.level(),
            AppEvent::Worker(_) => EventLevel::Info,
            AppEvent::Report(event) => event.level(),
            AppEvent::General(event) => event.level(),
        }
    }

    /// Subsystem that originated this event.
    #[must_use]
    pub fn source(&self) -> EventSource {
        match self {
            AppEvent::Pool(_) => EventSource::POOL,
            AppEvent::Worker(_) => EventSource::WORKER,
            AppEvent::Report(_) => EventSource::REPORT,
            AppEvent::General(_) => EventSource::GENERAL,
        }
    }

    /// Build routing metadata for this event.
    #[must_use]
    pub fn meta(&self) -> EventMeta {
        EventMeta::new(self.level(), self.source())
    }
}
