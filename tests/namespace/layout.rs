//! Physical record layout in the flat store

use crate::common::*;
use std::collections::BTreeMap;

fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn open_writes_root_marker() {
    let (store, _ns) = memory_ns("app");
    assert_eq!(dump(&store), entries(&[("app", "{}")]));
}

#[test]
fn set_writes_value_and_ancestor_indexes() {
    let (store, ns) = memory_ns("app");
    ns.set("a:b:c", "v1").unwrap();

    assert_eq!(
        dump(&store),
        entries(&[
            ("app", "{}"),
            ("app:*", r#"["a:b:c"]"#),
            ("app:a:*", r#"["a:b:c"]"#),
            ("app:a:b:*", r#"["a:b:c"]"#),
            ("app:a:b:c", r#""v1""#),
        ])
    );
}

#[test]
fn remove_leaves_emptied_indexes_in_place() {
    let (store, ns) = memory_ns("app");
    ns.set("a:b", 1i64).unwrap();
    ns.remove("a:b").unwrap();

    assert_eq!(
        dump(&store),
        entries(&[("app", "{}"), ("app:*", "[]"), ("app:a:*", "[]")])
    );
}

#[test]
fn set_orders_indexes_before_value() {
    let (store, ns) = recorded_ns("app");
    ns.set("a:b", 1i64).unwrap();

    let keys: Vec<String> = store
        .mutations()
        .into_iter()
        .map(|op| match op {
            RecordedOp::Set { key, .. } | RecordedOp::Remove { key } => key,
            RecordedOp::Clear => "<clear>".to_string(),
        })
        .collect();
    assert_eq!(keys, vec!["app:*", "app:a:*", "app:a:b"]);
    assert_eq!(store.batches_applied(), 1);
}

#[test]
fn remove_orders_value_before_indexes() {
    let (store, ns) = recorded_ns("app");
    ns.set("a:b", 1i64).unwrap();
    store.reset();
    ns.remove("a:b").unwrap();

    let ops = store.mutations();
    assert_eq!(
        ops[0],
        RecordedOp::Remove {
            key: "app:a:b".to_string()
        }
    );
    assert_eq!(ops.len(), 3);
    assert_eq!(store.sets_to("app:*"), 1);
    assert_eq!(store.sets_to("app:a:*"), 1);
}

#[test]
fn overwrite_rewrites_only_the_value() {
    let (store, ns) = recorded_ns("app");
    ns.set("a:b:c", 1i64).unwrap();
    store.reset();
    ns.set("a:b:c", 2i64).unwrap();

    assert_eq!(
        store.mutations(),
        vec![RecordedOp::Set {
            key: "app:a:b:c".to_string(),
            value: "2".to_string()
        }]
    );
}

#[test]
fn removing_an_absent_key_writes_nothing() {
    let (store, ns) = recorded_ns("app");
    ns.remove("never:set").unwrap();
    assert!(store.mutations().is_empty());
    assert_eq!(store.batches_applied(), 0);
}

#[test]
fn corrupt_index_reads_as_empty() {
    let (store, ns) = memory_ns("app");
    ns.set("a:b", 1i64).unwrap();
    store.set_item("app:a:*", "not json").unwrap();

    assert!(ns.get_group("a").unwrap().is_empty());
    // the next write through the group rebuilds it
    ns.set("a:c", 2i64).unwrap();
    assert_eq!(ns.group_keys("a").unwrap(), vec!["a:c".to_string()]);
}

#[test]
fn dangling_index_members_are_skipped() {
    let (store, ns) = memory_ns("app");
    ns.set("a:b", 1i64).unwrap();
    ns.set("a:c", 2i64).unwrap();
    store.remove_item("app:a:b").unwrap();

    assert_eq!(ns.get_group("a").unwrap(), vec![Value::Int(2)]);
    let live: Vec<Value> = ns.iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(live, vec![Value::Int(2)]);
}
