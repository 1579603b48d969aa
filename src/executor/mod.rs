//! Result assembly: ordering and pagination
//!
//! # Flow
//!
//! 1. Filter (in-memory evaluator) or compile (remote) upstream
//! 2. Sort by a single field, nulls first
//! 3. Skip `(page - 1) * limit` rows
//! 4. Take `limit` rows
//! 5. Report the full filtered count as `total`

mod assembler;
mod errors;
mod page;
mod sorter;

pub use assembler::ResultAssembler;
pub use errors::{ExecutorError, ExecutorResult};
pub use page::{PageRequest, QueryPage, SortDirection, SortSpec};
pub use sorter::ResultSorter;
