//! Executor error types
//!
//! Error codes:
//! - EXEC_INVALID_PAGE
//! - EXEC_INVALID_LIMIT
//! - EXEC_REMOTE_FETCH_FAILED

use thiserror::Error;

use crate::remote::SourceError;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// Pages are 1-based
    #[error("page must be at least 1, got {0}")]
    InvalidPage(usize),

    #[error("limit must be at least 1, got {0}")]
    InvalidLimit(usize),

    /// Page or count fetch failed. No partial page is returned.
    #[error("remote fetch failed: {0}")]
    RemoteFetch(#[from] SourceError),
}

impl ExecutorError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::InvalidPage(_) => "EXEC_INVALID_PAGE",
            ExecutorError::InvalidLimit(_) => "EXEC_INVALID_LIMIT",
            ExecutorError::RemoteFetch(_) => "EXEC_REMOTE_FETCH_FAILED",
        }
    }

    /// True when the caller's request was at fault rather than the backend
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ExecutorError::RemoteFetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ExecutorError::InvalidPage(0).code(), "EXEC_INVALID_PAGE");
        let err: ExecutorError = SourceError::Unavailable("down".into()).into();
        assert_eq!(err.code(), "EXEC_REMOTE_FETCH_FAILED");
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("down"));
    }
}
