//! Group indexes: the auxiliary records behind prefix queries
//!
//! Every hierarchy level a namespace uses has one index record at
//! `<base>:*` holding a JSON array of the logical keys that live at or
//! below that level. Reading a group is then O(group size) instead of a
//! scan over the whole flat store.
//!
//! ## Invariants
//!
//! - **Completeness**: a live key K is listed in the index of the namespace
//!   root and of every strict prefix of K.
//! - **Soundness**: a key is listed only while its value record exists.
//! - **Uniqueness**: a key is listed at most once per index.
//!
//! Index changes are staged into a [`WriteBatch`] alongside the value
//! change they belong to, so the namespace layer can hand the store one
//! ordered batch per mutation. An index whose membership would not change
//! is never staged.

use tracing::{debug, warn};

use nestkv_core::key;
use nestkv_core::{FlatStore, Result, WriteBatch};

/// Members of one group index
///
/// Keeps insertion order and never holds a key twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    keys: Vec<String>,
}

impl GroupIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `keys`, dropping repeats after the first
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut index = Self::new();
        for k in keys {
            index.insert(k.into());
        }
        index
    }

    /// Add `key`; returns false if it was already a member
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Drop `key`; returns false if it was not a member
    pub fn remove(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(pos) => {
                self.keys.remove(pos);
                true
            }
            None => false,
        }
    }

    /// True if `key` is a member
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Members in insertion order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Consume the index, returning its members
    pub fn into_keys(self) -> Vec<String> {
        self.keys
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the index has no members
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stored text of this index
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.keys)?)
    }

    /// Parse stored text; `None` if it is not an array of strings
    pub fn decode(text: &str) -> Option<Self> {
        serde_json::from_str::<Vec<String>>(text)
            .ok()
            .map(Self::from_keys)
    }
}

/// Read the index at `base`
///
/// A missing record is an empty index. So is a record that does not parse;
/// that case is logged, never returned as an error.
pub fn read_index<S: FlatStore + ?Sized>(store: &S, base: &str) -> Result<GroupIndex> {
    let record = key::index_key(base);
    match store.get_item(&record)? {
        None => Ok(GroupIndex::new()),
        Some(text) => Ok(GroupIndex::decode(&text).unwrap_or_else(|| {
            warn!(target: "nestkv::index", index = %record, "Unreadable index record, treating as empty");
            GroupIndex::new()
        })),
    }
}

/// Replace the index at `base` with `index`
pub fn write_index<S: FlatStore + ?Sized>(store: &S, base: &str, index: &GroupIndex) -> Result<()> {
    let record = key::index_key(base);
    store.set_item(&record, &index.encode()?)?;
    debug!(target: "nestkv::index", index = %record, members = index.len(), "Wrote index");
    Ok(())
}

/// Add `member` to the index at `base`
///
/// Returns true if the index changed. Nothing is written otherwise.
pub fn add_to_index<S: FlatStore + ?Sized>(store: &S, base: &str, member: &str) -> Result<bool> {
    let mut batch = WriteBatch::new();
    let staged = stage_add(store, &[base.to_string()], member, &mut batch)?;
    if staged > 0 {
        store.apply(&batch)?;
    }
    Ok(staged > 0)
}

/// Remove `member` from the index at `base`
///
/// Returns true if the index changed. Nothing is written otherwise.
pub fn remove_from_index<S: FlatStore + ?Sized>(
    store: &S,
    base: &str,
    member: &str,
) -> Result<bool> {
    let mut batch = WriteBatch::new();
    let staged = stage_remove(store, &[base.to_string()], member, &mut batch)?;
    if staged > 0 {
        store.apply(&batch)?;
    }
    Ok(staged > 0)
}

/// Stage the addition of `member` to every index in `bases`
///
/// Returns the number of index records staged.
pub fn stage_add<S: FlatStore + ?Sized>(
    store: &S,
    bases: &[String],
    member: &str,
    batch: &mut WriteBatch,
) -> Result<usize> {
    let mut staged = 0;
    for base in bases {
        let mut index = read_index(store, base)?;
        if index.insert(member) {
            batch.set(key::index_key(base), index.encode()?);
            staged += 1;
        }
    }
    Ok(staged)
}

/// Stage the removal of `member` from every index in `bases`
///
/// Returns the number of index records staged.
pub fn stage_remove<S: FlatStore + ?Sized>(
    store: &S,
    bases: &[String],
    member: &str,
    batch: &mut WriteBatch,
) -> Result<usize> {
    let mut staged = 0;
    for base in bases {
        let mut index = read_index(store, base)?;
        if index.remove(member) {
            batch.set(key::index_key(base), index.encode()?);
            staged += 1;
        }
    }
    Ok(staged)
}
