//! Filter state error types
//!
//! Error codes:
//! - STATE_IO
//! - STATE_SERIALIZE
//! - STATE_LOCK_POISONED

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for filter state operations
pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("filter state I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize filter state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("filter state lock poisoned")]
    LockPoisoned,
}

impl StateError {
    pub fn code(&self) -> &'static str {
        match self {
            StateError::Io { .. } => "STATE_IO",
            StateError::Serialize(_) => "STATE_SERIALIZE",
            StateError::LockPoisoned => "STATE_LOCK_POISONED",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StateError::Io {
            path: path.into(),
            source,
        }
    }
}
