//! Durable key/value storage for the persisted root record.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("persisted record is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Blocking key/value storage. Callers on the runtime go through `spawn_blocking`.
pub trait DurableStorage: Send + Sync + 'static {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One JSON file per key under a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a crash mid-write
/// leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DurableStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");

        let mut file = fs::File::create(&staging).map_err(io_error(&staging))?;
        file.write_all(value.as_bytes()).map_err(io_error(&staging))?;
        file.sync_all().map_err(io_error(&staging))?;
        fs::rename(&staging, &path).map_err(io_error(&path))
    }
}

/// In-process storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, e.g. one left behind by an older schema.
    pub fn with_record(self, key: &str, value: &str) -> Self {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl DurableStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let records = self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip_and_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert!(storage.read("persist:root").unwrap().is_none());

        storage.write("persist:root", r#"{"auth":{}}"#).unwrap();
        storage.write("persist:root", r#"{"auth":{"token":"t"}}"#).unwrap();
        assert_eq!(
            storage.read("persist:root").unwrap().as_deref(),
            Some(r#"{"auth":{"token":"t"}}"#)
        );
        assert!(dir.path().join("nested/persist_root.json").exists());
        assert!(!dir.path().join("nested/persist_root.json.tmp").exists());
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new().with_record("a", "1");
        assert_eq!(storage.read("a").unwrap().as_deref(), Some("1"));
        storage.write("a", "2").unwrap();
        assert_eq!(storage.read("a").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.read("b").unwrap(), None);
    }
}
