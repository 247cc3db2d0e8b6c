//! Store configuration.
//!
//! A [`StoreConfig`] picks the storage key and the persistence backend. It
//! can be built in code or loaded from a JSON file; missing fields take
//! their defaults:
//!
//! ```json
//! { "key": "userState", "backend": { "type": "file", "path": "session.json" } }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{FileStorage, KeyValueStore, MemoryStorage};
use crate::{Error, Result};

/// Key the session state is persisted under.
pub const USER_STATE_KEY: &str = "userState";

/// Session store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Storage key for the serialized state.
    pub key: String,
    /// Where the state is persisted.
    pub backend: BackendConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: USER_STATE_KEY.to_string(),
            backend: BackendConfig::None,
        }
    }
}

/// Persistence backend selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    /// No persistence; the store is in-memory only.
    #[default]
    None,
    /// Process-local map, lost on exit.
    Memory,
    /// JSON file on disk.
    File { path: PathBuf },
}

impl StoreConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Persist to the file at `path`.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = BackendConfig::File { path: path.into() };
        self
    }

    /// Use `key` instead of the default storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Instantiate the configured backend, if any.
    pub fn build_backend(&self) -> Option<Arc<dyn KeyValueStore>> {
        match &self.backend {
            BackendConfig::None => None,
            BackendConfig::Memory => Some(Arc::new(MemoryStorage::new())),
            BackendConfig::File { path } => Some(Arc::new(FileStorage::new(path.clone()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.key, "userState");
        assert_eq!(config.backend, BackendConfig::None);
        assert!(config.build_backend().is_none());
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn parse_file_backend() {
        let config = StoreConfig::from_json(
            r#"{"key":"session","backend":{"type":"file","path":"/tmp/s.json"}}"#,
        )
        .unwrap();
        assert_eq!(config.key, "session");
        assert_eq!(
            config.backend,
            BackendConfig::File {
                path: PathBuf::from("/tmp/s.json")
            }
        );
    }

    #[test]
    fn parse_memory_backend() {
        let config = StoreConfig::from_json(r#"{"backend":{"type":"memory"}}"#).unwrap();
        assert_eq!(config.backend, BackendConfig::Memory);
        assert!(config.build_backend().is_some());
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = StoreConfig::from_json(r#"{"backend":{"type":"cloud"}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"key":"custom"}}"#).unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.key, "custom");
        assert_eq!(config.backend, BackendConfig::None);
    }

    #[test]
    fn from_missing_file_is_io_error() {
        let err = StoreConfig::from_file("/nonexistent/keepsake.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn builders() {
        let config = StoreConfig::default()
            .with_key("k")
            .with_file("state.json");
        assert_eq!(config.key, "k");
        assert!(matches!(config.backend, BackendConfig::File { .. }));
    }
}
