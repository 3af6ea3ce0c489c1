use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Logical key holding the signed-in profile.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Logical key holding every registered account.
pub const USERS_KEY: &str = "users";
/// Logical key holding the recorded income list.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Logical key holding the savings goal.
pub const GOAL_KEY: &str = "financialGoal";

/// Abstraction over durable key-value backends storing JSON documents.
///
/// No schema versioning or migration is performed; values are written and
/// read back as-is.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, CoreError>;
    fn save(&self, key: &str, value: &Value) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Loads `key` and deserializes it as `T`.
///
/// A missing key is `Ok(None)`; a value that no longer matches `T` is an
/// error so callers can decide whether to discard it.
pub fn load_typed<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, CoreError> {
    match store.load(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and stores it under `key`.
pub fn save_typed<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let json = serde_json::to_value(value)?;
    store.save(key, &json)
}

/// In-memory store. Clones share the same underlying map, so a test can keep
/// a handle and inspect what the application wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, CoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}
