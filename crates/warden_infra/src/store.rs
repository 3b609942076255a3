//! State/config stores with an explicit read/write contract.
//!
//! The pipeline is handed snapshots; this module owns where they come from.
//! `JsonFileStore` persists `config.json` / `state.json` the way the original
//! deployment does; `MemoryStore` is the in-memory fake that makes the
//! pipeline testable without touching disk. The core imposes no storage
//! format; anything satisfying `StateStore` works.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use warden_core::config::EngineConfig;
use warden_core::types::AccountState;

use crate::clock::epoch_ms;
use crate::doc::{ConfigDoc, DocError, StateDoc};

/// Failure while loading or persisting state/config.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
    Doc(DocError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "store i/o error: {err}"),
            StoreError::Parse(err) => write!(f, "store parse error: {err}"),
            StoreError::Doc(err) => write!(f, "store document error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Parse(err) => Some(err),
            StoreError::Doc(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err)
    }
}

impl From<DocError> for StoreError {
    fn from(err: DocError) -> Self {
        StoreError::Doc(err)
    }
}

/// Read/write contract for account state and configuration.
///
/// `load_config`/`load_state` are called once per decision; implementations
/// may cache or reload freely, but each call must return one consistent
/// snapshot.
pub trait StateStore {
    fn load_config(&self) -> Result<EngineConfig, StoreError>;
    fn load_state(&self) -> Result<AccountState, StoreError>;
    fn save_state(&self, state: &AccountState) -> Result<(), StoreError>;
}

// --- JSON file store ------------------------------------------------------

/// File-backed store: `config.json` (read-only) and `state.json`.
///
/// State writes go through a temp file + rename so a crash mid-write never
/// leaves a truncated document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config_path: PathBuf,
    state_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(config_path: impl Into<PathBuf>, state_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            state_path: state_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load_config(&self) -> Result<EngineConfig, StoreError> {
        let raw = fs::read_to_string(&self.config_path)?;
        let doc: ConfigDoc = serde_json::from_str(&raw)?;
        Ok(EngineConfig::try_from(doc)?)
    }

    fn load_state(&self) -> Result<AccountState, StoreError> {
        if !self.state_path.exists() {
            // First run: seed and persist a fresh-account state.
            let state = AccountState::default_state(epoch_ms());
            self.save_state(&state)?;
            return Ok(state);
        }
        let raw = fs::read_to_string(&self.state_path)?;
        let doc: StateDoc = serde_json::from_str(&raw)?;
        Ok(AccountState::try_from(doc)?)
    }

    fn save_state(&self, state: &AccountState) -> Result<(), StoreError> {
        let doc = StateDoc::from(state);
        let contents = serde_json::to_string_pretty(&doc)?;
        Self::write_atomic(&self.state_path, &contents)
    }
}

// --- In-memory store ------------------------------------------------------

/// In-memory store for tests and embedding.
#[derive(Debug)]
pub struct MemoryStore {
    config: EngineConfig,
    state: Mutex<AccountState>,
}

impl MemoryStore {
    pub fn new(config: EngineConfig, state: AccountState) -> Self {
        Self {
            config,
            state: Mutex::new(state),
        }
    }
}

impl StateStore for MemoryStore {
    fn load_config(&self) -> Result<EngineConfig, StoreError> {
        Ok(self.config)
    }

    fn load_state(&self) -> Result<AccountState, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_state(&self, state: &AccountState) -> Result<(), StoreError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = state.clone();
        Ok(())
    }
}
