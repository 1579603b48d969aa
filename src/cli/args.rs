//! CLI argument definitions using clap
//!
//! Commands:
//! - fieldsieve serve --config <path>
//! - fieldsieve query --config <path>
//! - fieldsieve validate --config <path>
//! - fieldsieve explain --config <path>
//! - fieldsieve seed --out <path>
//! - fieldsieve session --config <path> <add|update|remove|clear|list>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldsieve - typed filter evaluation over record collections
#[derive(Parser, Debug)]
#[command(name = "fieldsieve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the filter API over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./fieldsieve.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one filter request read from stdin and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./fieldsieve.json")]
        config: PathBuf,
    },

    /// Report per-condition validation for filters read from stdin
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./fieldsieve.json")]
        config: PathBuf,
    },

    /// Print the compiled predicate for filters read from stdin
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./fieldsieve.json")]
        config: PathBuf,
    },

    /// Write a generated employee dataset
    Seed {
        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Number of employees
        #[arg(long, default_value_t = 60)]
        count: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Edit the persisted filter session
    Session {
        /// Path to configuration file
        #[arg(long, default_value = "./fieldsieve.json")]
        config: PathBuf,

        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Append a condition
    Add {
        field: String,
        operator: String,
        /// Value as JSON (bare words are taken as strings)
        value: Option<String>,
    },

    /// Change a condition's field, operator or value
    Update {
        id: String,
        #[arg(long)]
        field: Option<String>,
        #[arg(long)]
        operator: Option<String>,
        /// Value as JSON (bare words are taken as strings)
        #[arg(long)]
        value: Option<String>,
    },

    /// Remove a condition by id
    Remove { id: String },

    /// Remove every condition
    Clear,

    /// Print conditions with their validation results
    List,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
