//! Namespaces over the file backend

use crate::common::*;
use nestkv::{BackendKind, CONFIG_FILE_NAME};

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    file_config()
        .write_to_file(&dir.path().join(CONFIG_FILE_NAME))
        .unwrap();

    {
        let db = Database::open(dir.path()).unwrap();
        let app = db.namespace("app").unwrap();
        app.set("a:b:c", "v1").unwrap();
        app.set("a:b:d", "v2").unwrap();
        app.remove("a:b:c").unwrap();
    }

    let db = Database::open(dir.path()).unwrap();
    assert_eq!(db.store().kind(), BackendKind::File);
    let app = db.namespace("app").unwrap();
    assert_eq!(app.get_group("a:b").unwrap(), vec![Value::from("v2")]);
    assert_eq!(app.get_group("a").unwrap(), vec![Value::from("v2")]);
    assert!(!app.has("a:b:c").unwrap());
}

#[test]
fn store_file_holds_the_flat_layout() {
    let (dir, db) = file_db();
    let app = db.namespace("app").unwrap();
    app.set("x:y", 7i64).unwrap();

    let text = std::fs::read_to_string(dir.path().join("store.json")).unwrap();
    let on_disk: std::collections::BTreeMap<String, String> = serde_json::from_str(&text).unwrap();
    assert_eq!(on_disk.get("app").map(String::as_str), Some("{}"));
    assert_eq!(on_disk.get("app:*").map(String::as_str), Some(r#"["x:y"]"#));
    assert_eq!(on_disk.get("app:x:*").map(String::as_str), Some(r#"["x:y"]"#));
    assert_eq!(on_disk.get("app:x:y").map(String::as_str), Some("7"));
}

#[test]
fn full_clear_empties_the_file() {
    let (dir, db) = file_db();
    db.namespace("one").unwrap().set("k", 1i64).unwrap();
    let two = db.namespace("two").unwrap();
    two.set("k", 2i64).unwrap();

    two.clear(None).unwrap();

    let text = std::fs::read_to_string(dir.path().join("store.json")).unwrap();
    let on_disk: std::collections::BTreeMap<String, String> = serde_json::from_str(&text).unwrap();
    assert!(on_disk.is_empty());
}

#[test]
fn config_limits_apply_to_namespaces() {
    let dir = tempfile::tempdir().unwrap();
    let config = NestConfig {
        max_key_bytes: 8,
        ..file_config()
    };
    let db = Database::open_with_config(dir.path(), config).unwrap();
    let ns = db.namespace("app").unwrap();

    ns.set("12345678", 1i64).unwrap();
    assert!(ns.set("123456789", 1i64).unwrap_err().is_validation());
}
