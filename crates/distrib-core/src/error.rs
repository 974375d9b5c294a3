//! Error types for loading input tables and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Table;

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised before allocation begins. All of them are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{table} table is empty")]
    EmptyInput { table: Table },

    #[error("{file}:{line}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("{file}:{line}: duplicate id '{id}'")]
    DuplicateId {
        file: String,
        line: usize,
        id: String,
    },

    #[error("node id '{id}' is reserved for unassignable files")]
    ReservedId { id: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),
}
