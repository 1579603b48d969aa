//! CLI command implementations

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};

use super::args::{Cli, Command, SessionAction};
use super::config::{Config, Mode};
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_request, write_response};
use super::seed;
use crate::engine::{Backend, EngineError, FilterEngine};
use crate::executor::PageRequest;
use crate::filter::{decode_conditions, ConditionDiagnostic, FilterCondition, FilterValue};
use crate::http_server::{EmployeeState, HttpServer};
use crate::observability::{log_event_with_fields, Event};
use crate::remote::MemoryStore;
use crate::state::{ConditionPatch, FileStateStore, FilterSession};

/// One-shot filter request read by `query`, `validate` and `explain`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Decoded element by element; see [`decode_conditions`]
    #[serde(default)]
    pub filters: Vec<Value>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl QueryRequest {
    fn page_request(&self, config: &Config) -> CliResult<PageRequest> {
        config
            .limits
            .page_request(
                self.page,
                self.limit,
                self.order_by.as_deref(),
                self.order.as_deref(),
            )
            .map_err(|e| CliError::from(EngineError::from(e)))
    }

    /// Well-formed conditions plus diagnostics for the elements that are not
    fn conditions(&self) -> (Vec<FilterCondition>, Vec<ConditionDiagnostic>) {
        decode_conditions(self.filters.clone())
    }
}

/// Parse args and run
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Query { config } => query(&config),
        Command::Validate { config } => validate(&config),
        Command::Explain { config } => explain(&config),
        Command::Seed { out, count, seed } => seed_dataset(&out, count, seed),
        Command::Session { config, action } => session(&config, action),
    }
}

/// Loads config, schema and dataset into an engine and backend
fn boot(config: &Config) -> CliResult<(FilterEngine, Backend)> {
    let registry = config.registry()?;
    let aliases = config.aliases();
    let records = config.load_dataset()?;

    log_event_with_fields(
        Event::DatasetLoaded,
        &[
            ("fields", &registry.len().to_string()),
            ("path", &config.dataset_path.display().to_string()),
            ("records", &records.len().to_string()),
        ],
    );

    let backend = match config.mode {
        Mode::Memory => Backend::InMemory(Arc::new(records)),
        Mode::Remote => Backend::Remote(Arc::new(MemoryStore::seeded(&records, &aliases))),
    };

    Ok((FilterEngine::new(Arc::new(registry), Arc::new(aliases)), backend))
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("mode", if config.mode == Mode::Memory { "memory" } else { "remote" }),
            ("path", &config_path.display().to_string()),
        ],
    );
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Serve the HTTP API until the listener fails
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let (engine, backend) = boot(&config)?;
    let state = EmployeeState::new(engine, backend).with_limits(config.limits);
    let server = HttpServer::with_config(config.http.clone(), state);

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Run one request from stdin and print the page
pub fn query(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let (engine, backend) = boot(&config)?;

    let request: QueryRequest = read_request()?;
    let page_request = request.page_request(&config)?;
    let (filters, rejected) = request.conditions();

    let outcome = runtime()?
        .block_on(engine.run(&backend, &filters, &page_request))?
        .with_rejected(rejected);

    log_event_with_fields(
        Event::QueryEvaluated,
        &[
            ("filters", &request.filters.len().to_string()),
            ("invalid", &outcome.invalid.len().to_string()),
            ("mode", backend.mode()),
            ("total", &outcome.page.total.to_string()),
        ],
    );

    write_response(&outcome)
}

/// Print validation results for the filters on stdin
pub fn validate(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let engine = FilterEngine::new(Arc::new(config.registry()?), Arc::new(config.aliases()));

    let request: QueryRequest = read_request()?;
    let (filters, mut invalid) = request.conditions();
    let partition = engine.validate(&filters);
    invalid.extend(partition.invalid);

    let valid: Vec<&str> = partition.valid.iter().map(|c| c.id.as_str()).collect();
    write_response(&json!({
        "valid": valid,
        "invalid": invalid,
    }))
}

/// Print the compiled predicate for the filters on stdin
pub fn explain(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let engine = FilterEngine::new(Arc::new(config.registry()?), Arc::new(config.aliases()));

    let request: QueryRequest = read_request()?;
    let (filters, mut excluded) = request.conditions();
    excluded.extend(engine.validate(&filters).invalid);

    write_response(&json!({
        "predicate": engine.compile(&filters),
        "excluded": excluded,
    }))
}

/// Write a generated dataset
pub fn seed_dataset(out: &Path, count: usize, seed: Option<u64>) -> CliResult<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let records = seed::generate(count, &mut rng);
    fs::write(out, serde_json::to_string_pretty(&records)?)?;

    write_response(&json!({
        "path": out.display().to_string(),
        "records": records.len(),
    }))
}

/// Edit or list the persisted filter session
pub fn session(config_path: &Path, action: SessionAction) -> CliResult<()> {
    let config = load_config(config_path)?;
    let state_path = config
        .state_path
        .clone()
        .ok_or_else(|| CliError::config_error("state_path is required for session commands"))?;

    let mut session =
        FilterSession::open(Arc::new(config.registry()?), FileStateStore::new(state_path))?;

    match action {
        SessionAction::Add {
            field,
            operator,
            value,
        } => {
            let value = value.as_deref().map(parse_value).unwrap_or_default();
            let id = session.add(field, operator, value)?;
            return write_response(&json!({ "id": id }));
        }
        SessionAction::Update {
            id,
            field,
            operator,
            value,
        } => {
            let patch = ConditionPatch {
                field,
                operator,
                value: value.as_deref().map(parse_value),
            };
            if !session.update(&id, patch)? {
                return Err(unknown_condition(&id));
            }
        }
        SessionAction::Remove { id } => {
            if !session.remove(&id)? {
                return Err(unknown_condition(&id));
            }
        }
        SessionAction::Clear => session.clear()?,
        SessionAction::List => {}
    }

    let diagnostics = session.diagnostics();
    let conditions: Vec<Value> = session
        .conditions()
        .iter()
        .map(|c| {
            json!({
                "condition": c,
                "validation": diagnostics.get(&c.id),
            })
        })
        .collect();

    write_response(&conditions)
}

fn unknown_condition(id: &str) -> CliError {
    CliError::new(
        CliErrorCode::StateError,
        format!("No condition with id '{}'", id),
    )
}

/// JSON if it parses, otherwise the raw text
fn parse_value(raw: &str) -> FilterValue {
    serde_json::from_str(raw).unwrap_or_else(|_| FilterValue::Text(raw.to_string()))
}
