//! Filter engine
//!
//! Orchestrates validation, evaluation or compilation, and result assembly.
//! Everything up to the remote fetch is synchronous and pure; the only
//! suspension points are the page and count fetches.

mod engine;
mod errors;
mod sequencer;

pub use engine::{Backend, FilterEngine, FilterOutcome};
pub use errors::{EngineError, EngineResult};
pub use sequencer::{QueryController, RequestSequencer, Submission, Ticket};
