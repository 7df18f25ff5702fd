//! Namespace isolation and handle sharing

use crate::common::*;
use std::sync::Arc;
use std::thread;

#[test]
fn same_key_in_two_namespaces() {
    let store = Arc::new(MemoryStore::new());
    let a = NamespaceStore::open(Arc::clone(&store), "a").unwrap();
    let b = NamespaceStore::open(Arc::clone(&store), "b").unwrap();

    a.set("k", "in a").unwrap();
    b.set("k", "in b").unwrap();
    b.remove("k").unwrap();

    assert_eq!(a.get("k").unwrap(), Some(Value::from("in a")));
    assert!(!b.has("k").unwrap());
    assert_eq!(a.len().unwrap(), 1);
    assert_eq!(b.len().unwrap(), 0);
}

#[test]
fn handles_for_the_same_namespace_see_each_other() {
    let store = Arc::new(MemoryStore::new());
    let first = NamespaceStore::open(Arc::clone(&store), "app").unwrap();
    let second = NamespaceStore::open(Arc::clone(&store), "app").unwrap();

    first.set("x:y", 1i64).unwrap();
    assert_eq!(second.get("x:y").unwrap(), Some(Value::Int(1)));
    assert_eq!(second.get_group("x").unwrap(), vec![Value::Int(1)]);

    second.remove("x:y").unwrap();
    assert!(first.is_empty().unwrap());
}

#[test]
fn reopening_keeps_existing_data() {
    let store = Arc::new(RecordingStore::new(MemoryStore::new()));
    let first = NamespaceStore::open(Arc::clone(&store), "app").unwrap();
    first.set("k", 1i64).unwrap();
    store.reset();

    let again = NamespaceStore::open(Arc::clone(&store), "app").unwrap();
    assert!(store.mutations().is_empty());
    assert_eq!(again.get("k").unwrap(), Some(Value::Int(1)));
}

#[test]
fn cloned_handles_share_the_store() {
    let (_store, ns) = memory_ns("app");
    let clone = ns.clone();
    clone.set("k", true).unwrap();
    assert_eq!(ns.get("k").unwrap(), Some(Value::Bool(true)));
    assert_eq!(clone.namespace(), "app");
}

#[test]
fn handles_work_across_threads() {
    let store = Arc::new(MemoryStore::new());
    let workers: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let ns = NamespaceStore::open(store, format!("worker{}", t)).unwrap();
                for i in 0..25i64 {
                    ns.set(&format!("items:{}", i), i).unwrap();
                }
                ns.len().unwrap()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 25);
    }
    let w0 = NamespaceStore::open(store, "worker0").unwrap();
    assert_eq!(w0.get_group("items").unwrap().len(), 25);
}
