//! Engine error types
//!
//! Error codes:
//! - FILTER_INVALID_PAGE
//! - FILTER_REMOTE_FETCH_FAILED

use thiserror::Error;

use crate::executor::ExecutorError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine failures. Invalid conditions are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid page request: {0}")]
    InvalidPage(ExecutorError),

    /// Single failure for the whole request, no partial result
    #[error("{0}")]
    RemoteFetch(ExecutorError),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidPage(_) => "FILTER_INVALID_PAGE",
            EngineError::RemoteFetch(_) => "FILTER_REMOTE_FETCH_FAILED",
        }
    }
}

impl From<ExecutorError> for EngineError {
    fn from(err: ExecutorError) -> Self {
        if err.is_client_error() {
            EngineError::InvalidPage(err)
        } else {
            EngineError::RemoteFetch(err)
        }
    }
}
