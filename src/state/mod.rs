//! Persisted filter state
//!
//! A [`FilterSession`] owns the editable condition list and writes it
//! through a [`FilterStateStore`] after every change.

mod errors;
mod session;
mod store;

pub use errors::{StateError, StateResult};
pub use session::{ConditionPatch, FilterSession};
pub use store::{FileStateStore, FilterStateStore, MemoryStateStore};
