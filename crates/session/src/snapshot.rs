use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::accounts::AccountsStore;
use crate::files::FilesStore;
use crate::settings::SettingsStore;
use crate::tabs::TabsStore;

/// Schema version written by this build. Snapshots from other versions must
/// go through the migration table before they are loaded.
pub const CURRENT_VERSION: &str = "0.1";

/// Snapshot error type.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no session snapshot at {0}")]
    NotFound(PathBuf),

    #[error("failed to read session snapshot: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse session snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported session snapshot version {0}")]
    UnsupportedVersion(String),
}

/// Versioned, serializable representation of all four registries, used to
/// restore a session. Absent slices fall back to stock defaults at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(rename = "VERSION")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_store: Option<AccountsStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs_store: Option<TabsStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_store: Option<FilesStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_store: Option<SettingsStore>,
}

impl SessionSnapshot {
    /// A current-version snapshot with no slices; loading it yields a stock
    /// session.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            saved_at: None,
            accounts_store: None,
            tabs_store: None,
            files_store: None,
            settings_store: None,
        }
    }

    /// Lifts the snapshot to [`CURRENT_VERSION`], one schema version at a
    /// time. Versions without a migration step are a hard load error, not a
    /// best-effort continuation.
    pub fn migrate(mut self) -> Result<Self, SnapshotError> {
        while self.version != CURRENT_VERSION {
            let from = self.version.clone();
            self = Self::migrate_step(self)?;
            warn!(from = %from, to = %self.version, "migrated session snapshot");
        }
        Ok(self)
    }

    /// Lifts a snapshot one schema version forward. Each released version
    /// gets an arm here; "0.1" is the first persisted schema, so the table
    /// currently rejects everything that is not already current.
    fn migrate_step(snapshot: Self) -> Result<Self, SnapshotError> {
        Err(SnapshotError::UnsupportedVersion(snapshot.version))
    }

    /// Reads and migrates a snapshot from `path`. A missing file is
    /// reported as [`SnapshotError::NotFound`] so callers can fall back to
    /// a stock session without swallowing real IO failures.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotError::NotFound(path.to_path_buf()));
            }
            Err(err) => return Err(SnapshotError::Io(err)),
        };
        let snapshot = serde_json::from_str::<Self>(&raw)?;
        snapshot.migrate()
    }

    /// Writes the snapshot as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(self)?;
        fs::write(path, encoded)?;
        Ok(())
    }
}
