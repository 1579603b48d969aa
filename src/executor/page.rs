//! Ordering and pagination request and result types

use serde::{Deserialize, Serialize};

use super::errors::{ExecutorError, ExecutorResult};
use crate::filter::Record;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` is descending, anything else ascending
    pub fn parse(s: &str) -> Self {
        if s == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Single-field sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Dot-path of the field to sort by
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Page request. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    /// Validated request
    pub fn new(page: usize, limit: usize) -> ExecutorResult<Self> {
        if page == 0 {
            return Err(ExecutorError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(ExecutorError::InvalidLimit(limit));
        }
        Ok(Self {
            page,
            limit,
            sort: None,
        })
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Number of matching rows skipped before this page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort: None,
        }
    }
}

/// One page of results plus the total filtered count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPage {
    pub data: Vec<Record>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl QueryPage {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
