use std::fs;

use chrono::{TimeZone, Utc};
use serde_json::json;
use tally_core::{
    storage::{load_typed, save_typed, KeyValueStore, GOAL_KEY, TRANSACTIONS_KEY},
    CoreError,
};
use tally_domain::{Goal, Transaction};
use tally_storage_json::JsonKeyValueStore;
use tempfile::tempdir;

#[test]
fn json_store_round_trips_documents() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path().join("data")).expect("create store");

    let txns = vec![Transaction::new(
        "Freelance",
        320.0,
        Utc.with_ymd_and_hms(2025, 5, 4, 13, 0, 0).unwrap(),
    )];
    save_typed(&store, TRANSACTIONS_KEY, &txns).expect("save transactions");

    let loaded: Vec<Transaction> = load_typed(&store, TRANSACTIONS_KEY)
        .expect("load transactions")
        .expect("transactions present");
    assert_eq!(loaded, txns);

    let path = store.key_path(TRANSACTIONS_KEY);
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_store_missing_key_is_none() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path()).expect("create store");

    assert!(store.load(GOAL_KEY).expect("load").is_none());
    store.remove(GOAL_KEY).expect("removing a missing key succeeds");
}

#[test]
fn json_store_remove_deletes_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path()).expect("create store");
    let goal = Goal::new(
        1200.0,
        chrono::NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
    );

    save_typed(&store, GOAL_KEY, &goal).expect("save goal");
    assert_eq!(store.list_keys().expect("list"), vec!["financial_goal"]);

    store.remove(GOAL_KEY).expect("remove goal");
    assert!(store.list_keys().expect("list").is_empty());
    assert!(store.load(GOAL_KEY).expect("load").is_none());
}

#[test]
fn json_store_writes_pretty_json() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path()).expect("create store");

    store
        .save("currentUser", &json!({"name": "Ana"}))
        .expect("save");

    let raw = fs::read_to_string(dir.path().join("current_user.json")).expect("read file");
    assert!(raw.contains("\n"));
    assert!(raw.contains("\"name\": \"Ana\""));
}

#[test]
fn json_store_reports_corrupt_documents() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path()).expect("create store");
    fs::write(store.key_path(TRANSACTIONS_KEY), "{ not json").expect("write garbage");

    let result = store.load(TRANSACTIONS_KEY);

    assert!(matches!(result, Err(CoreError::Serde(_))));
}
