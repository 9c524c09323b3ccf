//! Reporting and artifact error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ReportError {
    #[error("failed to write artifact {path}: {message}")]
    ArtifactIo { path: String, message: String },

    #[error("chart rendering failed: {message}")]
    Render { message: String },
}
