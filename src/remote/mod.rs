//! Remote predicate compilation and record sources
//!
//! Conditions that passed validation are compiled into a [`Predicate`] and
//! handed to a [`RecordSource`], which returns one sorted page plus the total
//! count. [`MemoryStore`] executes predicates in-process.

mod aliases;
mod compiler;
mod predicate;
mod source;
mod store;

pub use aliases::AliasTable;
pub use compiler::PredicateCompiler;
pub use predicate::{Comparison, Operand, Predicate};
pub use source::{RecordSource, SourceError, SourceResult};
pub use store::MemoryStore;
