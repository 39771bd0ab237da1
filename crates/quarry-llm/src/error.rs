//! Provider errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    /// The request never produced a usable HTTP response.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The endpoint answered, but not with what we expected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider cannot be constructed from the given configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type LlmResult<T> = Result<T, LlmError>;
