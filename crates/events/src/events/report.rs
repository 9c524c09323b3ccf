use serde::{Deserialize, Serialize};

use crate::meta::EventLevel;

/// Events emitted by the reporting/sampling subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReportEvent {
    /// The sampler recorded an instantaneous utilization reading
    UtilizationSampled {
        /// Percentage of capacity in use
        utilization: f64,
        available: u64,
    },

    /// A utilization chart was persisted to disk
    ArtifactWritten { path: String },

    /// Leftover artifacts from earlier runs were deleted at startup
    StaleArtifactsRemoved { count: usize },
}

impl ReportEvent {
    /// Samples are high-frequency chatter; artifact activity is notable.
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            ReportEvent::UtilizationSampled { .. } => EventLevel::Debug,
            ReportEvent::ArtifactWritten { .. } | ReportEvent::StaleArtifactsRemoved { .. } => {
                EventLevel::Info
            }
        }
    }
}
