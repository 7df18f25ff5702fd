//! Store configuration via `nestkv.toml`
//!
//! On first open of a data directory, a default `nestkv.toml` is created.
//! To change settings, edit the file and reopen.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use nestkv_core::limits::{DEFAULT_MAX_KEY_BYTES, DEFAULT_MAX_NESTING_DEPTH, MAX_DECODABLE_DEPTH};
use nestkv_core::{Error, FlatStore, Limits, Result};
use nestkv_primitives::NamespaceStore;

use crate::backend::Backend;

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "nestkv.toml";

/// Flat store backend selected by the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process `MemoryStore`; nothing survives the process
    Memory,
    /// JSON file-backed `FileStore`
    File,
}

/// Store configuration loaded from `nestkv.toml`.
///
/// # Example
///
/// ```toml
/// # Backend: "memory" (default) or "file"
/// backend = "file"
/// path = "store.json"
/// capacity_bytes = 5242880
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NestConfig {
    /// Backend: `"memory"` or `"file"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Store file for the file backend; relative paths resolve against the
    /// data directory. Required when `backend = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Optional capacity of the store in bytes (keys plus values).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_bytes: Option<usize>,
    /// Maximum logical key length in bytes.
    #[serde(default = "default_max_key_bytes")]
    pub max_key_bytes: usize,
    /// Maximum nesting depth of stored values.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_max_key_bytes() -> usize {
    DEFAULT_MAX_KEY_BYTES
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
            capacity_bytes: None,
            max_key_bytes: default_max_key_bytes(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl NestConfig {
    /// Parse the backend string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"memory"` or `"file"`.
    pub fn backend_kind(&self) -> Result<BackendKind> {
        match self.backend.as_str() {
            "memory" => Ok(BackendKind::Memory),
            "file" => Ok(BackendKind::File),
            other => Err(Error::InvalidConfig(format!(
                "Invalid backend '{}' in nestkv.toml. Expected \"memory\" or \"file\".",
                other
            ))),
        }
    }

    /// Limits every namespace handle opened under this config receives.
    pub fn limits(&self) -> Limits {
        Limits {
            max_key_bytes: self.max_key_bytes,
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    /// Store file for the file backend, resolved against `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if no `path` is configured.
    pub fn store_path(&self, data_dir: &Path) -> Result<PathBuf> {
        let path = self.path.as_ref().ok_or_else(|| {
            Error::InvalidConfig(
                "backend = \"file\" requires a `path` in nestkv.toml".to_string(),
            )
        })?;
        if path.is_absolute() {
            Ok(path.clone())
        } else {
            Ok(data_dir.join(path))
        }
    }

    /// Check every field eagerly.
    pub fn validate(&self) -> Result<()> {
        if self.backend_kind()? == BackendKind::File && self.path.is_none() {
            return Err(Error::InvalidConfig(
                "backend = \"file\" requires a `path` in nestkv.toml".to_string(),
            ));
        }
        if self.max_key_bytes == 0 {
            return Err(Error::InvalidConfig(
                "max_key_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_nesting_depth > MAX_DECODABLE_DEPTH {
            return Err(Error::InvalidConfig(format!(
                "max_nesting_depth {} exceeds the supported maximum {}",
                self.max_nesting_depth, MAX_DECODABLE_DEPTH
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# NestKV store configuration
#
# Backend: "memory" (default) or "file"
#   "memory" = in-process store, nothing survives a restart
#   "file"   = JSON file in the data directory, rewritten on every change
backend = "memory"

# Store file, required for the "file" backend. Relative paths resolve
# against the data directory.
# path = "store.json"

# Store capacity in bytes (keys plus values). Writes that do not fit fail.
# capacity_bytes = 5242880

# Maximum logical key length in bytes.
max_key_bytes = 1024

# Maximum nesting depth of stored values, at most 127.
max_nesting_depth = 100
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: NestConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::InvalidConfig(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Load `nestkv.toml` from `data_dir`, writing the default first if missing.
    pub fn load_or_create(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to create data directory '{}': {}",
                data_dir.display(),
                e
            ))
        })?;
        let path = data_dir.join(CONFIG_FILE_NAME);
        Self::write_default_if_missing(&path)?;
        let config = Self::from_file(&path)?;
        info!(
            target: "nestkv::store",
            path = %path.display(),
            backend = %config.backend,
            "Loaded config"
        );
        Ok(config)
    }

    /// Open the flat store this config describes.
    ///
    /// The returned store is meant to be shared by every namespace handle.
    pub fn open_store(&self, data_dir: &Path) -> Result<Arc<Backend>> {
        self.validate()?;
        Ok(Arc::new(Backend::from_config(self, data_dir)?))
    }

    /// Open a namespace handle on `store` bound to this config's limits.
    pub fn open_namespace<S: FlatStore + ?Sized>(
        &self,
        store: Arc<S>,
        namespace: impl Into<String>,
    ) -> Result<NamespaceStore<S>> {
        NamespaceStore::open_with_limits(store, namespace, self.limits())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
