//! fieldsieve - typed filter evaluation and translation
//!
//! Composes field/operator/value conditions over a record collection and
//! evaluates them either in-process or by compiling them into a predicate
//! for a record store, with identical semantics on both paths.

pub mod cli;
pub mod engine;
pub mod executor;
pub mod filter;
pub mod http_server;
pub mod observability;
pub mod remote;
pub mod schema;
pub mod state;
