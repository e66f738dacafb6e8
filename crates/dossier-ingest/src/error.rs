use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed session document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid session field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}
