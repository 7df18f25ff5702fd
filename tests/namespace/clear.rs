//! Group clears and full-store clears

use crate::common::*;
use std::sync::Arc;

#[test]
fn clear_group_leaves_siblings_alone() {
    let (_store, ns) = memory_ns("ns");
    ns.set("sub:a", 1i64).unwrap();
    ns.set("sub:b:c", 2i64).unwrap();
    ns.set("sub:b:d", 3i64).unwrap();
    ns.set("other:x", 4i64).unwrap();

    ns.clear(Some("sub")).unwrap();

    assert!(!ns.has("sub:a").unwrap());
    assert!(!ns.has("sub:b:c").unwrap());
    assert!(!ns.has("sub:b:d").unwrap());
    assert_eq!(ns.get_group("sub").unwrap(), Vec::<Value>::new());
    assert_eq!(ns.get_group("sub:b").unwrap(), Vec::<Value>::new());

    assert_eq!(ns.get("other:x").unwrap(), Some(Value::Int(4)));
    assert_eq!(ns.keys().unwrap(), vec!["other:x".to_string()]);
}

#[test]
fn clear_group_accepts_wildcard_form() {
    let (_store, ns) = memory_ns("ns");
    ns.set("sub:a", 1i64).unwrap();
    ns.set("keep", 2i64).unwrap();

    assert_eq!(ns.clear_group("sub:*").unwrap(), 1);
    assert_eq!(ns.len().unwrap(), 1);
}

#[test]
fn clear_group_keeps_the_group_key_itself() {
    let (_store, ns) = memory_ns("ns");
    ns.set("sub", "parent").unwrap();
    ns.set("sub:child", "child").unwrap();

    assert_eq!(ns.clear_group("sub").unwrap(), 1);
    assert_eq!(ns.get("sub").unwrap(), Some(Value::from("parent")));
}

#[test]
fn clear_root_group_empties_only_this_namespace() {
    let store = Arc::new(MemoryStore::new());
    let mine = NamespaceStore::open(Arc::clone(&store), "mine").unwrap();
    let theirs = NamespaceStore::open(Arc::clone(&store), "theirs").unwrap();
    mine.set("a", 1i64).unwrap();
    mine.set("b:c", 2i64).unwrap();
    theirs.set("a", 3i64).unwrap();

    assert_eq!(mine.clear_group("").unwrap(), 2);

    assert!(mine.is_empty().unwrap());
    assert_eq!(theirs.get("a").unwrap(), Some(Value::Int(3)));
}

#[test]
fn clear_without_path_wipes_every_namespace() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let mine = NamespaceStore::open(Arc::clone(&store), "mine").unwrap();
    let theirs = NamespaceStore::open(Arc::clone(&store), "theirs").unwrap();
    mine.set("a", 1i64).unwrap();
    theirs.set("b", 2i64).unwrap();
    store.set_item("foreign", "raw").unwrap();

    mine.clear(None).unwrap();

    assert!(store.is_empty().unwrap());
    assert!(theirs.get("b").unwrap().is_none());
    assert!(theirs.is_empty().unwrap());
}

#[test]
fn stricter_handle_clears_keys_set_under_looser_limits() {
    let store = Arc::new(MemoryStore::new());
    let loose = NamespaceStore::open(Arc::clone(&store), "ns").unwrap();
    let strict =
        NamespaceStore::open_with_limits(Arc::clone(&store), "ns", Limits::with_small_limits())
            .unwrap();
    let long = format!("g:{}", "k".repeat(40));
    loose.set("g:a", 1i64).unwrap();
    loose.set(&long, 2i64).unwrap();
    loose.set("g:z", 3i64).unwrap();
    loose.set("keep", 4i64).unwrap();

    assert_eq!(strict.clear_group("g").unwrap(), 3);

    assert!(loose.group_keys("g").unwrap().is_empty());
    assert!(!loose.has(&long).unwrap());
    assert_eq!(loose.keys().unwrap(), vec!["keep".to_string()]);
    assert!(strict.set(&long, 1i64).unwrap_err().is_validation());
}

#[test]
fn clear_empty_group_writes_nothing() {
    let (store, ns) = recorded_ns("ns");
    assert_eq!(ns.clear_group("ghost").unwrap(), 0);
    assert!(store.mutations().is_empty());
}

#[test]
fn handle_stays_usable_after_full_clear() {
    let (_store, ns) = memory_ns("ns");
    ns.set("a", 1i64).unwrap();
    ns.clear_all().unwrap();

    ns.set("b", 2i64).unwrap();
    assert_eq!(ns.keys().unwrap(), vec!["b".to_string()]);
}
