use serde::{Deserialize, Serialize};

/// Lifecycle events for simulated container workers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerEvent {
    /// Worker task entered its request loop
    Started { worker: String },

    /// Worker observed the stop signal and exited
    Stopped { worker: String, iterations: u64 },
}
