//! Filter conditions, validation and in-memory evaluation
//!
//! # Combination semantics
//!
//! 1. Conditions are partitioned by field
//! 2. Within a field group, any matching condition passes the group (OR)
//! 3. Every group must pass (AND)
//! 4. No conditions means every record passes
//!
//! The remote compiler in `crate::remote` reproduces exactly this shape.

mod accessor;
pub mod coerce;
mod condition;
mod evaluator;
mod groups;
mod validator;

pub use accessor::get_path;
pub use condition::{Bound, FilterCondition, FilterValue};
pub use evaluator::{Evaluator, Record};
pub use groups::ConditionGroups;
pub use validator::{
    decode_conditions, ConditionDiagnostic, ConditionError, ConditionValidator, Partition,
    ValidationResult,
};
