//! Database: a data directory opened under its config
//!
//! `Database::open` loads (or creates) `nestkv.toml` in the directory,
//! opens the configured backend once, and hands out namespace handles that
//! all share it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use nestkv_core::Result;
use nestkv_primitives::NamespaceStore;

use crate::backend::Backend;
use crate::config::NestConfig;

/// An opened data directory
#[derive(Debug, Clone)]
pub struct Database {
    data_dir: PathBuf,
    config: NestConfig,
    store: Arc<Backend>,
}

impl Database {
    /// Open `data_dir`, writing a default `nestkv.toml` if it has none
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let config = NestConfig::load_or_create(&data_dir)?;
        Self::open_with_config(data_dir, config)
    }

    /// Open `data_dir` with an explicit config; the config file is ignored
    pub fn open_with_config(data_dir: impl AsRef<Path>, config: NestConfig) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let store = config.open_store(&data_dir)?;
        info!(
            target: "nestkv::store",
            path = %data_dir.display(),
            backend = %config.backend,
            "Opened database"
        );
        Ok(Self {
            data_dir,
            config,
            store,
        })
    }

    /// Handle for `namespace` on the shared store
    pub fn namespace(&self, namespace: impl Into<String>) -> Result<NamespaceStore<Backend>> {
        self.config
            .open_namespace(Arc::clone(&self.store), namespace)
    }

    /// Data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Active config
    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    /// Shared flat store
    pub fn store(&self) -> &Arc<Backend> {
        &self.store
    }
}
