//! Key-Value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::CacheError;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Type-safe key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. A file-backed cache rewrites its file on
/// every mutation, so a value is durable as soon as `set` returns.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl Cache {
    /// A cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                path: None,
                entries: Mutex::new(BTreeMap::new()),
            }),
        }
    }

    /// Open a file-backed cache, loading existing entries if the file exists.
    ///
    /// A missing file is not an error; it is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            load_entries(&path)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "opened cache");
        Ok(Self {
            inner: Arc::new(Inner {
                path: Some(path),
                entries: Mutex::new(entries),
            }),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let entries = self.inner.entries.lock();
        match entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.inner.entries.lock();
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    /// Delete a value from the cache. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.inner.entries.lock();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)
    }

    // Caller holds the entries lock, which serializes concurrent writers.
    fn flush(&self, entries: &BTreeMap<String, Value>) -> Result<(), CacheError> {
        let Some(path) = &self.inner.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, Value>, CacheError> {
    let open_error = |reason: String| CacheError::OpenError {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| open_error(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|e| open_error(e.to_string()))
}
