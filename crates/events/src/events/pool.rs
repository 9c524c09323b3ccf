use serde::{Deserialize, Serialize};

use crate::meta::EventLevel;

/// Events emitted by the resource pool, one per allocate/release call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PoolEvent {
    /// Capacity was granted to a consumer
    Allocated {
        consumer: String,
        amount: u64,
        /// Units remaining after the grant
        available: u64,
    },

    /// Admission control rejected the request
    Denied {
        consumer: String,
        amount: u64,
        /// Units available at the time of the decision
        available: u64,
    },

    /// Capacity was returned to the pool
    Released {
        consumer: String,
        amount: u64,
        /// Units available after the return
        available: u64,
    },
}

impl PoolEvent {
    /// Denials are warnings; everything else is routine.
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            PoolEvent::Denied { .. } => EventLevel::Warn,
            PoolEvent::Allocated { .. } | PoolEvent::Released { .. } => EventLevel::Info,
        }
    }
}
