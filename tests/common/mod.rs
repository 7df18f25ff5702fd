//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::collections::BTreeMap;
use std::sync::{Arc, Once};

pub use nestkv::testing::{FailingStore, RecordedOp, RecordingStore};
pub use nestkv::{
    Backend, Database, Error, Fetched, FileStore, FlatStore, Limits, MemoryStore,
    NamespaceStore, NestConfig, StoreError, Value,
};
use tempfile::TempDir;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness; safe to call repeatedly.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Fresh in-memory store with one namespace handle on it.
pub fn memory_ns(namespace: &str) -> (Arc<MemoryStore>, NamespaceStore<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let ns = NamespaceStore::open(Arc::clone(&store), namespace).expect("open namespace");
    (store, ns)
}

/// Namespace handle over a recording store, with the log reset after open.
pub fn recorded_ns(
    namespace: &str,
) -> (
    Arc<RecordingStore<MemoryStore>>,
    NamespaceStore<RecordingStore<MemoryStore>>,
) {
    init_tracing();
    let store = Arc::new(RecordingStore::new(MemoryStore::new()));
    let ns = NamespaceStore::open(Arc::clone(&store), namespace).expect("open namespace");
    store.reset();
    (store, ns)
}

/// Namespace handle over a store that fails once `budget` mutations are spent.
///
/// Opening the namespace does not count against the budget.
pub fn failing_ns(
    namespace: &str,
    budget: usize,
) -> (
    Arc<FailingStore<MemoryStore>>,
    NamespaceStore<FailingStore<MemoryStore>>,
) {
    init_tracing();
    let store = Arc::new(FailingStore::new(MemoryStore::new(), usize::MAX));
    let ns = NamespaceStore::open(Arc::clone(&store), namespace).expect("open namespace");
    store.set_budget(budget);
    (store, ns)
}

/// Config selecting the file backend at `store.json`.
pub fn file_config() -> NestConfig {
    NestConfig {
        backend: "file".to_string(),
        path: Some("store.json".into()),
        ..NestConfig::default()
    }
}

/// Database on the file backend in a fresh temp dir.
pub fn file_db() -> (TempDir, Database) {
    init_tracing();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = Database::open_with_config(dir.path(), file_config()).expect("open database");
    (dir, db)
}

// ============================================================================
// Assertions
// ============================================================================

/// Sorted copy of the string form of each value.
pub fn sorted_strings(values: Vec<Value>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            other => format!("{:?}", other),
        })
        .collect();
    out.sort();
    out
}

/// Full contents of a memory store.
pub fn dump(store: &MemoryStore) -> BTreeMap<String, String> {
    store.snapshot()
}
