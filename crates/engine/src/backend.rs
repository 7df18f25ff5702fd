//! Config-selected flat store
//!
//! [`Backend`] wraps whichever bundled store the config names so callers
//! hold one concrete type regardless of the choice.

use std::path::Path;

use tracing::info;

use nestkv_core::{FlatStore, Result, StoreResult, WriteBatch};
use nestkv_storage::{FileStore, MemoryStore};

use crate::config::{BackendKind, NestConfig};

/// A bundled flat store chosen at open time
#[derive(Debug)]
pub enum Backend {
    /// In-process store
    Memory(MemoryStore),
    /// JSON file store
    File(FileStore),
}

impl Backend {
    /// Build the backend `config` describes; relative paths resolve against `data_dir`
    pub fn from_config(config: &NestConfig, data_dir: &Path) -> Result<Self> {
        let backend = match config.backend_kind()? {
            BackendKind::Memory => Backend::Memory(match config.capacity_bytes {
                Some(capacity) => MemoryStore::with_capacity(capacity),
                None => MemoryStore::new(),
            }),
            BackendKind::File => {
                let path = config.store_path(data_dir)?;
                Backend::File(match config.capacity_bytes {
                    Some(capacity) => FileStore::open_with_capacity(&path, capacity)?,
                    None => FileStore::open(&path)?,
                })
            }
        };

        info!(
            target: "nestkv::store",
            backend = backend.kind_name(),
            capacity = ?config.capacity_bytes,
            "Opened backend"
        );
        Ok(backend)
    }

    /// Kind of store behind this backend
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Memory(_) => BackendKind::Memory,
            Backend::File(_) => BackendKind::File,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Backend::Memory(_) => "memory",
            Backend::File(_) => "file",
        }
    }

    /// Bytes currently held (keys plus values)
    pub fn used_bytes(&self) -> usize {
        match self {
            Backend::Memory(store) => store.used_bytes(),
            Backend::File(store) => store.used_bytes(),
        }
    }
}

impl FlatStore for Backend {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            Backend::Memory(store) => store.get_item(key),
            Backend::File(store) => store.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            Backend::Memory(store) => store.set_item(key, value),
            Backend::File(store) => store.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        match self {
            Backend::Memory(store) => store.remove_item(key),
            Backend::File(store) => store.remove_item(key),
        }
    }

    fn clear(&self) -> StoreResult<()> {
        match self {
            Backend::Memory(store) => store.clear(),
            Backend::File(store) => store.clear(),
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        match self {
            Backend::Memory(store) => store.keys(),
            Backend::File(store) => store.keys(),
        }
    }

    fn apply(&self, batch: &WriteBatch) -> StoreResult<()> {
        match self {
            Backend::Memory(store) => store.apply(batch),
            Backend::File(store) => store.apply(batch),
        }
    }
}
