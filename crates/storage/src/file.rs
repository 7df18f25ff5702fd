//! FileStore: flat store persisted as one JSON object on disk
//!
//! The whole store is cached in memory and written back after every change,
//! using write-fsync-rename so a crash leaves either the old or the new file.
//! Writes that would not change anything skip the disk entirely.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};

use nestkv_core::{FlatStore, StoreError, StoreResult, WriteBatch};

use crate::quota;

/// File-backed flat store with optional capacity
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: RwLock<BTreeMap<String, String>>,
    capacity: Option<usize>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty file if it is missing
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the file exists but is not a JSON
    /// object of strings, `StoreError::Io` on filesystem failures.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            Self::read(&path)?
        } else {
            let empty = BTreeMap::new();
            Self::write(&path, &empty)?;
            empty
        };

        info!(
            target: "nestkv::store",
            path = %path.display(),
            records = cache.len(),
            "Opened file store"
        );

        Ok(Self {
            path,
            cache: RwLock::new(cache),
            capacity: None,
        })
    }

    /// Open the store at `path` holding at most `capacity` bytes
    pub fn open_with_capacity(path: impl AsRef<Path>, capacity: usize) -> StoreResult<Self> {
        let mut store = Self::open(path)?;
        store.capacity = Some(capacity);
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes currently in use
    pub fn used_bytes(&self) -> usize {
        quota::usage_of(&self.cache.read())
    }

    fn read(path: &Path) -> StoreResult<BTreeMap<String, String>> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::Corrupt(format!(
                "store file '{}' is not a JSON object of strings: {}",
                path.display(),
                e
            ))
        })
    }

    fn write(path: &Path, data: &BTreeMap<String, String>) -> StoreResult<()> {
        let bytes = serde_json::to_vec(data)
            .map_err(|e| StoreError::Corrupt(format!("cannot encode store: {}", e)))?;
        let temp_path = temp_path(path);

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)?;
        debug!(
            target: "nestkv::store",
            path = %path.display(),
            bytes = bytes.len(),
            "Persisted file store"
        );
        Ok(())
    }
}

/// Scratch file next to `path`: the full file name plus `.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl FlatStore for FileStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.cache.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut cache = self.cache.write();
        if cache.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        let needed = quota::usage_after_set(&cache, quota::usage_of(&cache), key, value);
        quota::check(needed, self.capacity)?;

        let mut next = cache.clone();
        next.insert(key.to_string(), value.to_string());
        Self::write(&self.path, &next)?;
        *cache = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut cache = self.cache.write();
        if !cache.contains_key(key) {
            return Ok(());
        }

        let mut next = cache.clone();
        next.remove(key);
        Self::write(&self.path, &next)?;
        *cache = next;
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut cache = self.cache.write();
        if cache.is_empty() {
            return Ok(());
        }

        let next = BTreeMap::new();
        Self::write(&self.path, &next)?;
        *cache = next;
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.cache.read().keys().cloned().collect())
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.cache.read().contains_key(key))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.cache.read().len())
    }

    fn apply(&self, batch: &WriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut cache = self.cache.write();
        let needed = quota::usage_after_batch(&cache, quota::usage_of(&cache), batch);
        quota::check(needed, self.capacity)?;

        let mut next = cache.clone();
        quota::apply_to(&mut next, batch);
        if next == *cache {
            return Ok(());
        }
        Self::write(&self.path, &next)?;
        *cache = next;
        Ok(())
    }
}
