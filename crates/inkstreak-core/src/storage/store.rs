//! Activity store abstraction and its implementations.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::envelope::{deserialize, serialize, DayStatusMap, STORAGE_KEY};
use crate::error::StorageError;

/// Key-value persistence for the day-status collection.
///
/// `load` returns `Ok(None)` when nothing has been stored yet.
pub trait ActivityStore {
    fn load(&self) -> Result<Option<DayStatusMap>, StorageError>;

    fn save(&self, data: &DayStatusMap) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;

    /// Whether the backing medium can be used at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Stores the envelope as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/dayStatuses.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ActivityStore for JsonFileStore {
    fn load(&self) -> Result<Option<DayStatusMap>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => deserialize(&content).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, data: &DayStatusMap) -> Result<(), StorageError> {
        let content = serialize(data)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn is_available(&self) -> bool {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).is_ok()
            }
            _ => true,
        }
    }
}

/// In-process store holding the serialized envelope.
#[derive(Debug)]
pub struct MemoryStore {
    payload: Mutex<Option<String>>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            payload: Mutex::new(None),
            available: true,
        }
    }

    /// Seed the store with raw text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(raw.into())),
            available: true,
        }
    }

    /// A store whose medium cannot be used.
    pub fn unavailable() -> Self {
        Self {
            payload: Mutex::new(None),
            available: false,
        }
    }

    /// Current raw payload.
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.payload.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityStore for MemoryStore {
    fn load(&self) -> Result<Option<DayStatusMap>, StorageError> {
        self.lock().as_deref().map(deserialize).transpose()
    }

    fn save(&self, data: &DayStatusMap) -> Result<(), StorageError> {
        let content = serialize(data)?;
        *self.lock() = Some(content);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.lock() = None;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

impl<S: ActivityStore + ?Sized> ActivityStore for &S {
    fn load(&self) -> Result<Option<DayStatusMap>, StorageError> {
        (**self).load()
    }

    fn save(&self, data: &DayStatusMap) -> Result<(), StorageError> {
        (**self).save(data)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::envelope::DayStatus;

    fn sample() -> DayStatusMap {
        let mut map = DayStatusMap::new();
        map.insert("2024-06-05".into(), DayStatus::new("2024-06-05", true, true));
        map
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_none());
        assert!(store.path().ends_with("dayStatuses.json"));
    }

    #[test]
    fn file_store_persists_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path().join("nested"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_surfaces_corrupt_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), "{\"version\": 9, \"data\": {}}").unwrap();
        let err = store.load().unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(store.raw().unwrap().contains("\"version\": 1"));
        store.clear().unwrap();
        assert!(store.raw().is_none());
    }

    #[test]
    fn memory_store_reports_availability() {
        assert!(MemoryStore::new().is_available());
        assert!(!MemoryStore::unavailable().is_available());
    }
}
