//! Persisted state file
//!
//! A flat JSON key-value file: the five lists, their counts, the
//! last-refresh timestamp and user settings. Matchers are never
//! persisted; they are rebuilt from the arrays on load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sg_core::types::{ListCounts, Settings, StoredLists};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything SafeGuard persists between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub lists: StoredLists,
    pub counts: ListCounts,
    pub last_updated: Option<DateTime<Utc>>,
    pub settings: Settings,
}

/// Handle on the state file location.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state. A missing file yields defaults; a corrupt
    /// file is logged and also yields defaults. An empty store is a valid,
    /// if degraded, state.
    pub fn load(&self) -> PersistedState {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return PersistedState::default();
            }
            Err(err) => {
                log::warn!("failed to read state file {}: {err}", self.path.display());
                return PersistedState::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("corrupt state file {}: {err}", self.path.display());
                PersistedState::default()
            }
        }
    }

    /// Write the state atomically: serialize to a sibling temp file, then
    /// rename over the target.
    pub fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        let json = serde_json::to_vec_pretty(state)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
