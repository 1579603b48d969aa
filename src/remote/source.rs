//! Remote record source abstraction
//!
//! Error codes:
//! - SOURCE_UNAVAILABLE
//! - SOURCE_REJECTED

use async_trait::async_trait;
use thiserror::Error;

use super::predicate::Predicate;
use crate::executor::SortDirection;
use crate::filter::Record;

/// Result type for record source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Backend failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Backend could not be reached or did not answer
    #[error("record source unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the query
    #[error("record source rejected query: {0}")]
    Rejected(String),
}

impl SourceError {
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::Unavailable(_) => "SOURCE_UNAVAILABLE",
            SourceError::Rejected(_) => "SOURCE_REJECTED",
        }
    }
}

/// A backend that executes compiled predicates.
///
/// Both operations see the same predicate. They are issued concurrently, so
/// an implementation must not assume any ordering between them.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// One sorted page of matching rows
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        order_by: Option<&str>,
        order: SortDirection,
        offset: usize,
        limit: usize,
    ) -> SourceResult<Vec<Record>>;

    /// Number of rows matching the predicate
    async fn fetch_count(&self, predicate: &Predicate) -> SourceResult<usize>;
}
