use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use tally_core::{storage::KeyValueStore, CoreError};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed key-value persistence: one pretty-printed JSON document
/// per key inside a single directory.
#[derive(Debug, Clone)]
pub struct JsonKeyValueStore {
    root: PathBuf,
}

impl JsonKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(key), FILE_EXTENSION))
    }

    /// File stems of every stored document, sorted.
    pub fn list_keys(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl KeyValueStore for JsonKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Value>, CoreError> {
        let path = self.key_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let value = serde_json::from_str(&data)
            .map_err(|err| CoreError::Serde(format!("{}: {}", path.display(), err)))?;
        Ok(Some(value))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        let data = serde_json::to_string_pretty(value)?;
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "stored document");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "removed document");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Maps a logical key such as `financialGoal` to a file stem such as
/// `financial_goal`.
fn canonical_name(key: &str) -> String {
    let mut sanitized = String::new();
    for ch in key.trim().chars() {
        if ch.is_ascii_uppercase() {
            if !sanitized.is_empty() && !sanitized.ends_with('_') {
                sanitized.push('_');
            }
            sanitized.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_alphanumeric() {
            sanitized.push(ch);
        } else {
            sanitized.push('_');
        }
    }
    if sanitized.trim_matches('_').is_empty() {
        "document".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_splits_camel_case() {
        assert_eq!(canonical_name("financialGoal"), "financial_goal");
        assert_eq!(canonical_name("currentUser"), "current_user");
        assert_eq!(canonical_name("transactions"), "transactions");
        assert_eq!(canonical_name("../"), "document");
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/users.json"));
        assert_eq!(tmp, PathBuf::from("/data/users.json.tmp"));
    }
}
