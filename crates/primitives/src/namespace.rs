//! NamespaceStore: one namespace over a shared flat store
//!
//! ## Design
//!
//! NamespaceStore is a stateless facade over a flat store. It holds no
//! in-memory state beyond an `Arc` of the store, its namespace id and its
//! limits; every read goes to the store, so handles never go stale.
//!
//! ## Namespace Isolation
//!
//! Every physical key the handle writes is prefixed with the namespace id.
//! Any number of handles, including several for the same id, may share one
//! store and see each other's writes immediately.
//!
//! ## Mutation Order
//!
//! Each mutation is one [`WriteBatch`]:
//! - `set`: key validated and value encoded first, then the group indexes
//!   gain the key, then the value record is written
//! - `remove`: the value record is deleted, then the group indexes drop the
//!   key
//!
//! Stores that apply batches atomically make each mutation all-or-nothing.
//! Otherwise the order above is what survives a failure midway.
//!
//! ## API
//!
//! - **Reads**: `has`, `get`, `get_or`, `get_group`, `fetch`, `get_as`
//! - **Writes**: `set`, `set_as`, `remove`
//! - **Bulk**: `clear`, `clear_group`, `clear_all`
//! - **Listing**: `len`, `is_empty`, `keys`, `group_keys`, `iter`

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use nestkv_core::key::{self, validate_key_shape, validate_key_with_limits};
use nestkv_core::{codec, FlatStore, Limits, Result, Value, WriteBatch};

use crate::index;
use crate::request::{Fetched, Request};

/// Value the namespace root marker is created with
const ROOT_MARKER: &str = "{}";

/// Handle bound to one namespace of a flat store
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use nestkv_primitives::NamespaceStore;
/// use nestkv_storage::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// let app = NamespaceStore::open(store, "app")?;
///
/// app.set("config:theme", "dark")?;
/// app.set("config:lang", "en")?;
///
/// assert_eq!(app.get("config:theme")?, Some("dark".into()));
/// assert_eq!(app.get_group("config")?.len(), 2);
/// assert_eq!(app.len()?, 2);
/// # Ok::<(), nestkv_core::Error>(())
/// ```
pub struct NamespaceStore<S: ?Sized> {
    store: Arc<S>,
    namespace: String,
    limits: Limits,
}

impl<S: ?Sized> Clone for NamespaceStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            namespace: self.namespace.clone(),
            limits: self.limits.clone(),
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for NamespaceStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceStore")
            .field("namespace", &self.namespace)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl<S: FlatStore + ?Sized> NamespaceStore<S> {
    /// Open a handle for `namespace` with default limits
    ///
    /// Writes the namespace root marker if it is missing. Existing data is
    /// neither scanned nor repaired.
    pub fn open(store: Arc<S>, namespace: impl Into<String>) -> Result<Self> {
        Self::open_with_limits(store, namespace, Limits::default())
    }

    /// Open a handle for `namespace` with custom limits
    pub fn open_with_limits(
        store: Arc<S>,
        namespace: impl Into<String>,
        limits: Limits,
    ) -> Result<Self> {
        let namespace = namespace.into();
        if !store.contains_key(&namespace)? {
            store.set_item(&namespace, ROOT_MARKER)?;
            info!(target: "nestkv::ns", namespace = %namespace, "Created namespace");
        }
        Ok(Self {
            store,
            namespace,
            limits,
        })
    }

    /// Namespace id
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Limits bound to this handle
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The shared store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ========== Reads ==========

    /// True if a record exists at `namespace:key`
    ///
    /// The key shape is not validated, so `has("a:*")` reports whether the
    /// group index for `a` exists.
    pub fn has(&self, key: &str) -> Result<bool> {
        Ok(self.store.contains_key(&key::physical_key(&self.namespace, key))?)
    }

    /// Run a parsed read request
    pub fn request(&self, request: Request<'_>) -> Result<Fetched> {
        match request {
            Request::Get(key) => {
                let physical = key::physical_key(&self.namespace, key);
                match self.store.get_item(&physical)? {
                    Some(text) => Ok(Fetched::Value(codec::decode(&text)?)),
                    None => Ok(Fetched::Absent),
                }
            }
            Request::GetGroup(path) => {
                let base = key::group_base(&self.namespace, path);
                if !self.store.contains_key(&key::index_key(&base))? {
                    return Ok(Fetched::Absent);
                }
                Ok(Fetched::Group(self.get_group(path)?))
            }
        }
    }

    /// Read `key`, dispatching on a trailing wildcard
    pub fn fetch(&self, key: &str) -> Result<Fetched> {
        self.request(Request::parse(key))
    }

    /// Read `key`; a group request returns an array of member values
    ///
    /// Returns `None` if a plain key holds no value, or if a group has never
    /// had an index record. A group whose members were all removed returns
    /// an empty array.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.fetch(key)?.into_value())
    }

    /// Read `key`, returning `fallback` if it holds no value
    pub fn get_or(&self, key: &str, fallback: impl Into<Value>) -> Result<Value> {
        Ok(self.fetch(key)?.or(fallback.into()))
    }

    /// Read `key` into any deserializable type
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)?
            .map(|value| codec::from_value(&value, &self.limits))
            .transpose()
    }

    /// Values of every member of group `path`, in index order
    ///
    /// `path` is a logical prefix such as `"a:b"`; `""` is the namespace
    /// root. Members whose value record is missing are skipped, and a group
    /// without an index record is empty.
    pub fn get_group(&self, path: &str) -> Result<Vec<Value>> {
        let members = self.group_keys(path)?;
        let mut values = Vec::with_capacity(members.len());
        for member in &members {
            let physical = key::physical_key(&self.namespace, member);
            match self.store.get_item(&physical)? {
                Some(text) => values.push(codec::decode(&text)?),
                None => warn!(
                    target: "nestkv::ns",
                    namespace = %self.namespace,
                    key = %member,
                    "Indexed key has no value"
                ),
            }
        }
        Ok(values)
    }

    /// Logical keys in group `path`, in index order
    pub fn group_keys(&self, path: &str) -> Result<Vec<String>> {
        let path = key::group_path(path).unwrap_or(path);
        let base = key::group_base(&self.namespace, path);
        Ok(index::read_index(&*self.store, &base)?.into_keys())
    }

    /// Every live logical key of the namespace, in index order
    pub fn keys(&self) -> Result<Vec<String>> {
        self.group_keys("")
    }

    /// Number of live keys in the namespace
    pub fn len(&self) -> Result<usize> {
        Ok(index::read_index(&*self.store, &self.namespace)?.len())
    }

    /// True if the namespace holds no keys
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Lazily iterate the values of every live key
    ///
    /// The member list is read when iteration starts; each call to `iter`
    /// starts over from the current state.
    pub fn iter(&self) -> Values<'_, S> {
        Values {
            handle: self,
            members: None,
            failed: false,
        }
    }

    // ========== Writes ==========

    /// Store `value` at `key`
    ///
    /// # Errors
    ///
    /// - `Error::InvalidKey` if the key is empty, too long or contains `*`
    /// - `Error::SerializationError` if the value cannot be encoded
    /// - `Error::Store` if the store rejects the write
    ///
    /// The first two are raised before anything is written.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        validate_key_with_limits(key, &self.limits)?;
        let text = codec::encode(&value.into(), &self.limits)?;

        let mut batch = WriteBatch::new();
        let bases = key::ancestor_paths(&self.namespace, key);
        let indexed = index::stage_add(&*self.store, &bases, key, &mut batch)?;
        batch.set(key::physical_key(&self.namespace, key), text);
        self.store.apply(&batch)?;

        debug!(
            target: "nestkv::ns",
            namespace = %self.namespace,
            key,
            indexes = indexed,
            "Set key"
        );
        Ok(())
    }

    /// Store any serializable value at `key`
    pub fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, codec::to_value(value)?)
    }

    /// Delete `key` and drop it from its group indexes
    ///
    /// A no-op if the key holds no value and is not indexed. Keys nested
    /// below `key` are left alone.
    ///
    /// # Errors
    ///
    /// `Error::InvalidKey` for empty keys and keys holding a wildcard, so an
    /// index record can never be deleted through `remove`. Key length is not
    /// checked: keys set through a handle with looser limits stay removable.
    pub fn remove(&self, key: &str) -> Result<()> {
        validate_key_shape(key)?;

        let mut batch = WriteBatch::new();
        let physical = key::physical_key(&self.namespace, key);
        if self.store.contains_key(&physical)? {
            batch.remove(physical);
        }
        let bases = key::ancestor_paths(&self.namespace, key);
        let unindexed = index::stage_remove(&*self.store, &bases, key, &mut batch)?;

        if !batch.is_empty() {
            self.store.apply(&batch)?;
        }

        debug!(
            target: "nestkv::ns",
            namespace = %self.namespace,
            key,
            indexes = unindexed,
            "Removed key"
        );
        Ok(())
    }

    // ========== Bulk ==========

    /// Clear group `path`, or the whole store when `path` is `None`
    ///
    /// `None` wipes every record in the shared store, including other
    /// namespaces. Use [`clear_group`](Self::clear_group) with `""` to
    /// clear only this namespace.
    pub fn clear(&self, path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => self.clear_group(path).map(|_| ()),
            None => self.clear_all(),
        }
    }

    /// Remove every key nested under group `path`
    ///
    /// The member list is captured before the first removal. Returns the
    /// number of keys removed.
    pub fn clear_group(&self, path: &str) -> Result<usize> {
        let members = self.group_keys(path)?;
        for member in &members {
            self.remove(member)?;
        }
        debug!(
            target: "nestkv::ns",
            namespace = %self.namespace,
            group = path,
            removed = members.len(),
            "Cleared group"
        );
        Ok(members.len())
    }

    /// Wipe the entire shared store
    pub fn clear_all(&self) -> Result<()> {
        warn!(
            target: "nestkv::ns",
            namespace = %self.namespace,
            "Clearing entire store, all namespaces included"
        );
        Ok(self.store.clear()?)
    }
}

/// Lazy iterator over the values of a namespace
///
/// Created by [`NamespaceStore::iter`]. Yields `Err` at most once, then
/// stops.
pub struct Values<'a, S: ?Sized> {
    handle: &'a NamespaceStore<S>,
    members: Option<std::vec::IntoIter<String>>,
    failed: bool,
}

impl<'a, S: FlatStore + ?Sized> Iterator for Values<'a, S> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if self.members.is_none() {
            match self.handle.keys() {
                Ok(keys) => self.members = Some(keys.into_iter()),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        let members = self.members.as_mut()?;
        for member in members.by_ref() {
            match self.handle.request(Request::Get(&member)) {
                Ok(Fetched::Absent) => continue,
                Ok(fetched) => return fetched.into_value().map(Ok),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<'a, S: FlatStore + ?Sized> IntoIterator for &'a NamespaceStore<S> {
    type Item = Result<Value>;
    type IntoIter = Values<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
