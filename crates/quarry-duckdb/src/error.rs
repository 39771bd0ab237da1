//! Error types for the table store.

use thiserror::Error;

/// Errors raised by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be opened, even after retries and fallback.
    #[error("Connection error: {0}")]
    Open(String),

    /// The store has been closed and can no longer serve queries.
    #[error("store is closed")]
    Closed,

    /// A statement failed inside the engine.
    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    /// Filesystem problem while preparing the store location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
