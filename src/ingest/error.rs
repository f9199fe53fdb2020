//! Ingest error types.

use thiserror::Error;

/// Everything that can abort [`process`](super::process).
///
/// Messages are written for end users and carry their own context, so
/// callers can display them as-is.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No file provided")]
    NoFile,

    #[error("Please select an image file (got `{mime}`)")]
    InvalidType { mime: String },

    #[error("File too large ({size_mb:.2} MB). Maximum allowed: {limit_mb} MB")]
    FileTooLarge { size_mb: f64, limit_mb: f64 },

    #[error("Invalid ingest options: {0}")]
    InvalidOptions(String),

    // NOTE: no #[source] on the wrapped errors below, the message already
    // includes them and a source chain would print them twice
    #[error("Failed to process image: could not read `{name}`: {error}")]
    Io { name: String, error: std::io::Error },

    #[error("Failed to process image: `{name}`: {error}")]
    Decode {
        name: String,
        error: image::ImageError,
    },

    #[error("Failed to process image: worker for `{name}` did not finish: {error}")]
    Task {
        name: String,
        error: tokio::task::JoinError,
    },
}

impl IngestError {
    /// True for the errors raised before any file content is read.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoFile | Self::InvalidType { .. } | Self::FileTooLarge { .. } | Self::InvalidOptions(_)
        )
    }
}
