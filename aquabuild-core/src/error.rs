use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the data store and its file helpers.
///
/// A missing record is never an error: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A restricted delete found records that still reference the target
    #[error("{kind} {id} is still referenced by {count} record(s)")]
    HasDependents {
        kind: &'static str,
        id: String,
        count: usize,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Failed to determine configuration directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, StoreError>;
