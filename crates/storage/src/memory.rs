//! MemoryStore: in-process flat store
//!
//! This module implements the FlatStore trait using:
//! - `BTreeMap<String, String>` for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - an optional byte capacity, enforced on every write
//!
//! # Design Notes
//!
//! - **Atomic batches**: `apply` checks capacity for the whole batch first
//!   and applies it under one write lock, so a batch either lands whole or
//!   not at all.
//! - **Running usage**: bytes in use are tracked incrementally, never
//!   recomputed by a scan.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use nestkv_core::{FlatStore, StoreResult, WriteBatch};

use crate::quota;

#[derive(Debug, Default)]
struct Inner {
    data: BTreeMap<String, String>,
    used: usize,
}

/// In-memory flat store with optional capacity
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    capacity: Option<usize>,
}

impl MemoryStore {
    /// Create a new empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty store holding at most `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            capacity: Some(capacity),
        }
    }

    /// Create a store pre-populated with `entries`
    ///
    /// Capacity is not enforced for the initial contents.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let used = quota::usage_of(&data);
        Self {
            inner: RwLock::new(Inner { data, used }),
            capacity: None,
        }
    }

    /// Configured capacity in bytes, if any
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Bytes currently in use
    pub fn used_bytes(&self) -> usize {
        self.inner.read().used
    }

    /// Copy of every record, ordered by key
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.read().data.clone()
    }
}

impl FlatStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.inner.read().data.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let needed = quota::usage_after_set(&inner.data, inner.used, key, value);
        quota::check(needed, self.capacity)?;
        inner.data.insert(key.to_string(), value.to_string());
        inner.used = needed;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if let Some(old) = inner.data.remove(key) {
            inner.used -= quota::entry_size(key, &old);
        }
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut inner = self.inner.write();
        inner.data.clear();
        inner.used = 0;
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.inner.read().data.keys().cloned().collect())
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.inner.read().data.contains_key(key))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.inner.read().data.len())
    }

    fn apply(&self, batch: &WriteBatch) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let needed = quota::usage_after_batch(&inner.data, inner.used, batch);
        quota::check(needed, self.capacity)?;
        quota::apply_to(&mut inner.data, batch);
        inner.used = needed;
        Ok(())
    }
}
