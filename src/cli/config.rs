//! Configuration file and the resources it points at

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::filter::Record;
use crate::http_server::{HttpServerConfig, PageLimits};
use crate::remote::AliasTable;
use crate::schema::FieldSchemaRegistry;

/// Evaluation path used by `serve` and `query`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Evaluate in-process over the loaded dataset
    Memory,
    /// Compile to predicates and run them against a record store
    #[default]
    Remote,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON array of records (required)
    pub dataset_path: PathBuf,

    /// JSON array of field schema entries; the employee schema when absent
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Where `session` persists its conditions
    #[serde(default)]
    pub state_path: Option<PathBuf>,

    #[serde(default)]
    pub mode: Mode,

    /// UI field path to backend column
    #[serde(default = "default_column_aliases")]
    pub column_aliases: HashMap<String, String>,

    /// `default_limit` and `max_limit`, at the top level of the file
    #[serde(flatten)]
    pub limits: PageLimits,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_column_aliases() -> HashMap<String, String> {
    [
        ("address.city", "city"),
        ("address.state", "state"),
        ("address.country", "country"),
    ]
    .into_iter()
    .map(|(field, column)| (field.to_string(), column.to_string()))
    .collect()
}

impl Config {
    /// Load and validate configuration from file.
    ///
    /// Relative paths inside the file resolve against its directory.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(CliError::config_error("dataset_path must not be empty"));
        }

        self.limits.validate().map_err(CliError::config_error)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        resolve(&mut self.dataset_path);
        if let Some(p) = self.schema_path.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.state_path.as_mut() {
            resolve(p);
        }
    }

    pub fn registry(&self) -> CliResult<FieldSchemaRegistry> {
        match &self.schema_path {
            Some(path) => Ok(FieldSchemaRegistry::load(path)?),
            None => Ok(FieldSchemaRegistry::employees()),
        }
    }

    pub fn aliases(&self) -> AliasTable {
        self.column_aliases
            .iter()
            .fold(AliasTable::new(), |table, (field, column)| {
                table.with_alias(field.as_str(), column.as_str())
            })
    }

    pub fn load_dataset(&self) -> CliResult<Vec<Record>> {
        load_dataset(&self.dataset_path)
    }
}

/// Reads a JSON array of records
pub fn load_dataset(path: &Path) -> CliResult<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::dataset_error(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        CliError::dataset_error(format!(
            "{} is not a JSON array of records: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cfg.json", r#"{"dataset_path": "employees.json"}"#);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.mode, Mode::Remote);
        assert_eq!(config.limits, PageLimits::new(10, 1000));
        assert_eq!(config.dataset_path, dir.path().join("employees.json"));
        assert_eq!(config.aliases().column("address.city"), "city");
        assert_eq!(config.http.port, 5000);
    }

    #[test]
    fn test_rejects_bad_limits() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "cfg.json",
            r#"{"dataset_path": "d.json", "default_limit": 50, "max_limit": 20}"#,
        );
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "CLI_CONFIG_ERROR");

        let path = write(&dir, "cfg2.json", r#"{"dataset_path": ""}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_memory_mode_and_custom_aliases() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "cfg.json",
            r#"{"dataset_path": "/data/d.json", "mode": "memory", "column_aliases": {"meta.owner": "owner"}}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.mode, Mode::Memory);
        assert_eq!(config.dataset_path, PathBuf::from("/data/d.json"));
        assert_eq!(config.aliases().column("address.city"), "address.city");
        assert_eq!(config.aliases().column("meta.owner"), "owner");
    }

    #[test]
    fn test_load_dataset_rejects_object() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "d.json", r#"{"name": "Ada"}"#);
        let err = load_dataset(&path).unwrap_err();
        assert_eq!(err.code_str(), "CLI_DATASET_ERROR");
    }
}
