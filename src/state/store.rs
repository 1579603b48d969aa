//! Persisted filter state stores
//!
//! A store holds one opaque string. It knows nothing about conditions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{StateError, StateResult};

/// Load/save of the serialized condition list
pub trait FilterStateStore: Send + Sync {
    /// `None` when nothing has been saved yet
    fn load(&self) -> StateResult<Option<String>>;

    fn save(&self, payload: &str) -> StateResult<()>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FilterStateStore for FileStateStore {
    fn load(&self) -> StateResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StateError::io(&self.path, e)),
        }
    }

    fn save(&self, payload: &str) -> StateResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StateError::io(parent, e))?;
        }

        // Write then rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload).map_err(|e| StateError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StateError::io(&self.path, e))
    }
}

/// In-process store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    payload: RwLock<Option<String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RwLock::new(Some(payload.into())),
        }
    }
}

impl FilterStateStore for MemoryStateStore {
    fn load(&self) -> StateResult<Option<String>> {
        let payload = self.payload.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(payload.clone())
    }

    fn save(&self, payload: &str) -> StateResult<()> {
        let mut stored = self.payload.write().map_err(|_| StateError::LockPoisoned)?;
        *stored = Some(payload.to_string());
        Ok(())
    }
}
