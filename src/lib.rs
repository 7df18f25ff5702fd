//! NestKV - namespaced, hierarchically indexed key-value layer
//!
//! NestKV partitions one flat string store into namespaces and keeps a group
//! index per hierarchy level, so every key under a prefix such as
//! `"settings:ui"` can be read without scanning the store.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use nestkv::{MemoryStore, NamespaceStore, Value};
//!
//! let store = Arc::new(MemoryStore::new());
//! let app = NamespaceStore::open(store, "app")?;
//!
//! app.set("a:b:c", "v1")?;
//! app.set("a:b:d", "v2")?;
//! app.remove("a:b:c")?;
//!
//! assert_eq!(app.get("a:b:*")?, Some(Value::Array(vec!["v2".into()])));
//! assert!(!app.has("a:b:c")?);
//! # Ok::<(), nestkv::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `nestkv-core`: keys, values, codec, errors and the [`FlatStore`] trait
//! - `nestkv-storage`: the bundled [`MemoryStore`] and [`FileStore`]
//! - `nestkv-primitives`: [`NamespaceStore`] and its group indexes
//! - `nestkv-engine`: `nestkv.toml` config and [`Database`]

pub use nestkv_core::{
    codec, key, limits, BatchOp, Error, FlatStore, KeyError, Limits, Result, StoreError,
    StoreResult, Value, WriteBatch, DELIMITER, WILDCARD,
};
pub use nestkv_engine::{Backend, BackendKind, Database, NestConfig, CONFIG_FILE_NAME};
pub use nestkv_primitives::{index, Fetched, GroupIndex, NamespaceStore, Request, Values};
pub use nestkv_storage::{testing, FileStore, MemoryStore};
