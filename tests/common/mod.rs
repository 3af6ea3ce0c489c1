#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use chrono::{DateTime, TimeZone, Utc};
use income_core::app::AppState;
use once_cell::sync::Lazy;
use tally_config::{Config, ConfigManager};
use tally_core::FixedClock;
use tally_storage_json::JsonKeyValueStore;
use tempfile::TempDir;

pub const BIN_NAME: &str = "income_core_cli";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated home directory. Its config uses the cheapest bcrypt
/// cost so account commands stay fast.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    let config = Config {
        bcrypt_cost: 4,
        ..Config::default()
    };
    manager.save(&config).expect("write test config");
    base
}

/// Thursday, 19 June 2025, noon UTC.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).unwrap()
}

/// Application state backed by JSON documents under `base/data`.
pub fn json_state(base: &Path, now: DateTime<Utc>) -> AppState<FixedClock<Utc>> {
    let store = JsonKeyValueStore::new(base.join("data")).expect("create json store");
    AppState::load(Box::new(store), FixedClock::new(now)).with_bcrypt_cost(4)
}

pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("INCOME_CORE_CLI_SCRIPT", "1")
        .env("INCOME_CORE_HOME", home);
    cmd
}
