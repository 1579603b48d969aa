//! Ordering and pagination over either evaluation path

use super::errors::ExecutorResult;
use super::page::{PageRequest, QueryPage, SortDirection};
use super::sorter::ResultSorter;
use crate::filter::Record;
use crate::remote::{Predicate, RecordSource};

/// Turns a filtered collection, or a remote source, into one page
pub struct ResultAssembler;

impl ResultAssembler {
    /// Sorts and slices an already-filtered collection.
    ///
    /// `total` is the size of the whole collection, not of the page.
    pub fn assemble(mut records: Vec<Record>, request: &PageRequest) -> QueryPage {
        let total = records.len();

        if let Some(sort) = &request.sort {
            ResultSorter::sort(&mut records, sort);
        }

        let data = records
            .into_iter()
            .skip(request.offset())
            .take(request.limit)
            .collect();

        QueryPage {
            data,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    /// Fetches page and count concurrently. Fails if either fails.
    pub async fn assemble_remote(
        source: &dyn RecordSource,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> ExecutorResult<QueryPage> {
        let (order_by, order) = match &request.sort {
            Some(sort) => (Some(sort.field.as_str()), sort.direction),
            None => (None, SortDirection::Asc),
        };

        let (data, total) = tokio::try_join!(
            source.fetch_page(predicate, order_by, order, request.offset(), request.limit),
            source.fetch_count(predicate),
        )?;

        Ok(QueryPage {
            data,
            total,
            page: request.page,
            limit: request.limit,
        })
    }
}
