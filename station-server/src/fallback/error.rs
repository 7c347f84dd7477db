//! Static dataset error types.

use crate::domain::DomainError;

/// Errors that can occur when loading the static dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Dataset is not valid JSON or not station-shaped
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record violates a station invariant
    #[error("invalid station {id}: {source}")]
    InvalidStation { id: String, source: DomainError },

    /// Snapshot-level violation (duplicate ids)
    #[error("invalid dataset: {0}")]
    Snapshot(DomainError),

    /// Dataset holds no stations
    #[error("dataset is empty")]
    Empty,
}
