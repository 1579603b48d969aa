//! CLI module for fieldsieve
//!
//! Provides command-line interface for:
//! - serve: HTTP API over the configured dataset
//! - query / validate / explain: one-shot requests on stdin
//! - seed: generated employee dataset
//! - session: persisted filter conditions

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod seed;

pub use args::{Cli, Command, SessionAction};
pub use commands::{explain, query, run, run_command, seed_dataset, serve, session, validate, QueryRequest};
pub use config::{load_dataset, Config, Mode};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
pub use seed::generate as generate_employees;
