//! Pipeline errors.
//!
//! Validation rejections and execution failures are not errors here; they
//! are recorded on the [`quarry_core::query::CandidateQuery`] itself. This
//! enum covers the failures that stop a request before it produces a
//! candidate at all.

use thiserror::Error;

use quarry_duckdb::StoreError;
use quarry_llm::LlmError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The store holds no tables, so there is no schema to prompt with.
    #[error("No tables available for querying")]
    EmptyContext,

    /// The text provider failed to produce an answer.
    #[error(transparent)]
    Generation(#[from] LlmError),

    /// The store failed outside of statement execution.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Feedback log I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Feedback entry could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
