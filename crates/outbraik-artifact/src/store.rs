//! Atomic bundle persistence.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use outbraik_types::{Bundle, PersistenceError};

/// Configuration for [`ArtifactStore`].
///
/// The artifact location is an explicit parameter passed at construction;
/// there are no ambient path globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Where the bundle snapshot is published.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Creates a store configuration for the given artifact path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform default artifact path:
    ///
    /// - Linux: `~/.local/share/outbraik/forecast.json`
    /// - macOS: `~/Library/Application Support/outbraik/forecast.json`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\outbraik\forecast.json`
    ///
    /// Falls back to `~/.outbraik/forecast.json` when the platform location
    /// cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let dir = ProjectDirs::from("", "", "outbraik").map_or_else(
            || {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".outbraik")
            },
            |dirs| dirs.data_dir().to_path_buf(),
        );
        dir.join("forecast.json")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

/// Persists and retrieves the forecast bundle as a single JSON snapshot.
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so a reader can never observe a partially written document. Each save
/// supersedes any prior snapshot at the same path.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    config: StoreConfig,
}

impl ArtifactStore {
    /// Creates a store for the configured path.
    #[must_use]
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The published artifact path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Persists the full bundle atomically.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the directory cannot be created or
    /// the snapshot cannot be written or published.
    pub fn save(&self, bundle: &Bundle) -> Result<(), PersistenceError> {
        let path = &self.config.path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(bundle)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| PersistenceError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, path).map_err(|e| PersistenceError::Publish {
            path: path.clone(),
            source: e,
        })
    }

    /// Reads the published bundle back.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the snapshot cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Bundle, PersistenceError> {
        let path = &self.config.path;
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::Read {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| PersistenceError::Parse {
            path: path.clone(),
            source: e,
        })
    }
}
