//! Resource pool error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PoolError {
    /// Releasing this amount would push availability above total capacity.
    #[error(
        "release of {amount} by {consumer} would exceed capacity: {available} available of {total}"
    )]
    ReleaseOverflow {
        consumer: String,
        amount: u64,
        available: u64,
        total: u64,
    },
}
