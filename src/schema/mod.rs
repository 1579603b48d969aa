//! Field schema registry
//!
//! The schema is process-wide configuration: which fields can be filtered,
//! what type each one declares, and therefore which operators are legal.
//! It is loaded once and never mutated afterwards.

mod errors;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use registry::FieldSchemaRegistry;
pub use types::{FieldSchemaEntry, FieldType, Operator};
