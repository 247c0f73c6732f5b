//! Day-status book: the in-memory collection a front end edits, backed by
//! an [`ActivityStore`].
//!
//! The book owns the degrade-gracefully policy for persisted data. A corrupt
//! envelope is logged and treated as an empty history; I/O failures still
//! propagate. Every mutation writes the full collection back to the store.

use chrono::NaiveDate;

use crate::error::{Result, StorageError, StreakError};
use crate::storage::{ActivityStore, Config, DayStatus, DayStatusMap, JsonFileStore};
use crate::streak::{self, date_key, parse_date_key, DateInput, DayRecord, StreakReport};

/// Partial update for a day; `None` keeps the current flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    pub written: Option<bool>,
    pub published: Option<bool>,
}

impl StatusUpdate {
    pub fn written(value: bool) -> Self {
        Self {
            written: Some(value),
            published: None,
        }
    }

    pub fn published(value: bool) -> Self {
        Self {
            written: None,
            published: Some(value),
        }
    }
}

pub struct DayStatusBook<S: ActivityStore> {
    store: S,
    statuses: DayStatusMap,
    has_storage: bool,
}

impl<S: ActivityStore> DayStatusBook<S> {
    /// Open the book, loading whatever the store holds.
    ///
    /// # Errors
    /// Returns the store's error only when the medium itself fails.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let has_storage = store.is_available();
        let statuses = if has_storage {
            match store.load() {
                Ok(Some(map)) => drop_undated(map),
                Ok(None) => DayStatusMap::new(),
                Err(e) if e.is_corrupt() => {
                    tracing::warn!(error = %e, "failed to load day statuses, starting empty");
                    DayStatusMap::new()
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::warn!("activity store unavailable, changes will not be persisted");
            DayStatusMap::new()
        };

        Ok(Self {
            store,
            statuses,
            has_storage,
        })
    }

    pub fn has_storage(&self) -> bool {
        self.has_storage
    }

    pub fn statuses(&self) -> &DayStatusMap {
        &self.statuses
    }

    pub fn status(&self, date: NaiveDate) -> Option<&DayStatus> {
        self.statuses.get(&date_key(date))
    }

    /// Apply a partial update, creating the day with unset flags if needed.
    pub fn set_status(
        &mut self,
        date: NaiveDate,
        update: StatusUpdate,
    ) -> Result<DayStatus, StorageError> {
        let key = date_key(date);
        let mut next = self.statuses.clone();
        let entry = next
            .entry(key.clone())
            .or_insert_with(|| DayStatus::new(key, false, false));
        if let Some(written) = update.written {
            entry.written = written;
        }
        if let Some(published) = update.published {
            entry.published = published;
        }
        let status = entry.clone();
        self.commit(next)?;
        Ok(status)
    }

    /// Replace the day outright.
    pub fn create_status(
        &mut self,
        date: NaiveDate,
        written: bool,
        published: bool,
    ) -> Result<DayStatus, StorageError> {
        let key = date_key(date);
        let status = DayStatus::new(key.clone(), written, published);
        let mut next = self.statuses.clone();
        next.insert(key, status.clone());
        self.commit(next)?;
        Ok(status)
    }

    pub fn delete_status(&mut self, date: NaiveDate) -> Result<Option<DayStatus>, StorageError> {
        let mut next = self.statuses.clone();
        let removed = next.remove(&date_key(date));
        self.commit(next)?;
        Ok(removed)
    }

    /// Forget everything, removing the persisted collection too.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        if self.has_storage {
            self.store.clear()?;
        }
        self.statuses.clear();
        Ok(())
    }

    /// Engine input for the current collection.
    pub fn records(&self) -> Vec<DayRecord> {
        self.statuses.values().map(DayRecord::from).collect()
    }

    pub fn streak(&self, today: &DateInput) -> Result<StreakReport, StreakError> {
        streak::compute_streak(&self.records(), today)
    }

    pub fn longest_streak(&self, today: &DateInput) -> Result<u32, StreakError> {
        streak::longest_streak(&self.records(), today)
    }

    /// Save `next` and adopt it. A failed save leaves the book untouched.
    fn commit(&mut self, next: DayStatusMap) -> Result<(), StorageError> {
        if self.has_storage {
            self.store.save(&next)?;
        }
        self.statuses = next;
        Ok(())
    }
}

impl DayStatusBook<JsonFileStore> {
    /// Open the file-backed book at the location `config` points to.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = JsonFileStore::new(config.storage_path()?);
        tracing::debug!(path = %store.path().display(), "opening day statuses");
        Ok(Self::open(store)?)
    }
}

/// Entries whose date does not parse would make every streak call fail.
fn drop_undated(mut map: DayStatusMap) -> DayStatusMap {
    map.retain(|key, status| {
        let ok = parse_date_key(&status.date, key).is_ok();
        if !ok {
            tracing::warn!(
                key = %key,
                date = %status.date,
                "dropping day status with invalid date"
            );
        }
        ok
    });
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn set_status_creates_with_defaults_and_merges() {
        let store = MemoryStore::new();
        let mut book = DayStatusBook::open(&store).unwrap();

        let status = book.set_status(ymd(2024, 1, 1), StatusUpdate::written(true)).unwrap();
        assert_eq!(status, DayStatus::new("2024-01-01", true, false));

        let status = book.set_status(ymd(2024, 1, 1), StatusUpdate::published(true)).unwrap();
        assert_eq!(status, DayStatus::new("2024-01-01", true, true));
        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn create_status_overwrites() {
        let store = MemoryStore::new();
        let mut book = DayStatusBook::open(&store).unwrap();
        book.create_status(ymd(2024, 1, 1), true, true).unwrap();
        book.create_status(ymd(2024, 1, 1), false, true).unwrap();
        assert_eq!(
            book.status(ymd(2024, 1, 1)),
            Some(&DayStatus::new("2024-01-01", false, true))
        );
    }

    #[test]
    fn delete_status_persists_removal() {
        let store = MemoryStore::new();
        let mut book = DayStatusBook::open(&store).unwrap();
        book.create_status(ymd(2024, 1, 1), true, true).unwrap();
        let removed = book.delete_status(ymd(2024, 1, 1)).unwrap();
        assert!(removed.is_some());
        assert!(store.load().unwrap().unwrap().is_empty());
        assert!(book.delete_status(ymd(2024, 1, 1)).unwrap().is_none());
    }

    #[test]
    fn clear_all_removes_persisted_payload() {
        let store = MemoryStore::new();
        let mut book = DayStatusBook::open(&store).unwrap();
        book.create_status(ymd(2024, 1, 1), true, true).unwrap();
        book.clear_all().unwrap();
        assert!(book.statuses().is_empty());
        assert!(store.raw().is_none());
    }

    #[test]
    fn corrupt_payload_opens_empty() {
        let store = MemoryStore::with_raw(r#"{"version": 2, "data": {}}"#);
        let book = DayStatusBook::open(&store).unwrap();
        assert!(book.statuses().is_empty());
        assert!(book.has_storage());
    }

    #[test]
    fn entries_with_invalid_dates_are_dropped() {
        let store = MemoryStore::with_raw(
            r#"{"version": 1, "data": {
                "2024-02-30": {"date": "2024-02-30", "written": true, "published": true},
                "2024-02-28": {"date": "2024-02-28", "written": true, "published": true}
            }}"#,
        );
        let book = DayStatusBook::open(&store).unwrap();
        assert_eq!(book.statuses().len(), 1);
        assert_eq!(book.streak(&"2024-02-28".into()).unwrap().streak_length, 1);
    }

    #[test]
    fn unavailable_store_keeps_changes_in_memory() {
        let store = MemoryStore::unavailable();
        let mut book = DayStatusBook::open(&store).unwrap();
        assert!(!book.has_storage());
        book.create_status(ymd(2024, 1, 1), true, true).unwrap();
        assert_eq!(book.statuses().len(), 1);
        assert!(store.raw().is_none());
    }

    /// Loads fine but refuses every write.
    struct ReadOnlyStore;

    impl ActivityStore for ReadOnlyStore {
        fn load(&self) -> Result<Option<DayStatusMap>, StorageError> {
            Ok(None)
        }

        fn save(&self, _statuses: &DayStatusMap) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "read-only".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn clear(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn failed_save_leaves_book_unchanged() {
        let mut before = DayStatusMap::new();
        before.insert("2024-01-01".into(), DayStatus::new("2024-01-01", true, false));

        let mut book = DayStatusBook {
            store: ReadOnlyStore,
            statuses: before.clone(),
            has_storage: true,
        };
        assert!(book.create_status(ymd(2024, 1, 2), true, true).is_err());
        assert!(book.set_status(ymd(2024, 1, 1), StatusUpdate::published(true)).is_err());
        assert!(book.delete_status(ymd(2024, 1, 1)).is_err());
        assert_eq!(book.statuses(), &before);
        assert_eq!(
            book.status(ymd(2024, 1, 1)),
            Some(&DayStatus::new("2024-01-01", true, false))
        );
    }

    #[test]
    fn streak_reflects_book_contents() {
        let mut book = DayStatusBook::open(MemoryStore::new()).unwrap();
        for day in 1..=3 {
            book.create_status(ymd(2024, 6, day), true, true).unwrap();
        }
        book.set_status(ymd(2024, 6, 4), StatusUpdate::written(true)).unwrap();

        let report = book.streak(&ymd(2024, 6, 4).into()).unwrap();
        assert_eq!(report.streak_length, 3);
        assert_eq!(report.trailing_misses, 1);
        assert_eq!(report.last_activity_date, Some(ymd(2024, 6, 4)));
        assert_eq!(book.longest_streak(&ymd(2024, 6, 4).into()).unwrap(), 3);
    }
}
