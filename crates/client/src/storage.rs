//! Durable key/value storage for the cached wave count.

use crate::StorageError;
use alloy_primitives::U256;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// A string key/value store that outlives the view.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A store backed by a JSON object file.
///
/// The file is read on every access and rewritten on every write, so several processes sharing it
/// observe each other's last write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .map_err(|source| StorageError::Json { path: self.path.clone(), source })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _lock = self.lock.lock();
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _lock = self.lock.lock();
        // a corrupted file is replaced rather than blocking every future write
        let mut entries = self.read().unwrap_or_else(|err| {
            warn!(%err, "discarding unreadable storage");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source| StorageError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|source| StorageError::Json { path: self.path.clone(), source })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

/// An in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The wave count cached under a single storage key.
#[derive(Clone, Debug)]
pub struct WaveCountCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl WaveCountCache {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Reads the cached count, treating a missing, unreadable or unparsable value as zero.
    pub fn load(&self) -> U256 {
        let value = match self.store.get(&self.key) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "failed to read cached wave count");
                None
            }
        };
        value.and_then(|value| value.trim().parse().ok()).unwrap_or_default()
    }

    /// Persists `count` as a decimal string.
    pub fn store(&self, count: U256) -> Result<(), StorageError> {
        self.store.set(&self.key, &count.to_string())
    }
}
