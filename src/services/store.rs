//! JSON file persistence for session state.
//!
//! Each slot is one pretty-printed JSON file in the storage directory.
//! Missing or corrupt files read back as the slot's default so a damaged
//! file never blocks startup.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Persisted state slots
pub mod slot {
    pub const TASKS: &str = "tasks";
    pub const CHAT_HISTORY: &str = "chat_history";
    pub const SYLLABUS: &str = "syllabus";
    pub const LAST_SCHEDULE: &str = "last_schedule";

    pub const ALL: [&str; 4] = [TASKS, CHAT_HISTORY, SYLLABUS, LAST_SCHEDULE];
}

/// File-backed key-value store for session state
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }

    /// Read a slot strictly. A missing file is `Ok(None)`; a file that
    /// exists but does not decode is an error.
    pub fn load<T>(&self, slot: &str) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let path = self.slot_path(slot);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                slot: slot.to_string(),
                source,
            })
    }

    /// Read a slot, falling back to the default when the file is missing
    /// or cannot be decoded.
    pub fn load_or_default<T>(&self, slot: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.load(slot) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(slot, "slot missing, using default");
                T::default()
            }
            Err(e) => {
                warn!(slot, error = %e, "slot unreadable, using default");
                T::default()
            }
        }
    }

    /// Write a slot. The write goes through a sibling temp file and a
    /// rename so a crash mid-write leaves the previous contents intact.
    pub fn save<T: Serialize>(&self, slot: &str, value: &T) -> StoreResult<()> {
        let encoded =
            serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
                slot: slot.to_string(),
                source,
            })?;
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!(".{}.json.tmp", slot));
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &path)?;
        debug!(slot, "slot saved");
        Ok(())
    }

    /// Delete every known slot file. Missing files are not an error.
    pub fn purge(&self) -> StoreResult<()> {
        for slot in slot::ALL {
            let path = self.slot_path(slot);
            match fs::remove_file(&path) {
                Ok(()) => debug!(slot, "slot purged"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::Io(e)),
            }
        }
        Ok(())
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::planner::TaskList;
    use crate::domain::SyllabusProgress;
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_slot_reads_default() {
        let (_dir, store) = store();
        let tasks: TaskList = store.load_or_default(slot::TASKS);
        assert!(tasks.is_empty());
        let schedule: String = store.load_or_default(slot::LAST_SCHEDULE);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, store) = store();
        let mut tasks = TaskList::new();
        tasks.add("Revise thermodynamics");
        store.save(slot::TASKS, &tasks).unwrap();

        let loaded: TaskList = store.load_or_default(slot::TASKS);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().text, "Revise thermodynamics");
    }

    #[test]
    fn test_corrupt_slot_reads_default() {
        let (_dir, store) = store();
        fs::write(store.slot_path(slot::SYLLABUS), "{not json").unwrap();
        let progress: SyllabusProgress = store.load_or_default(slot::SYLLABUS);
        assert_eq!(progress.completed_in("Physics"), 0);
    }

    #[test]
    fn test_strict_load_distinguishes_missing_from_corrupt() {
        let (_dir, store) = store();
        let missing: Option<TaskList> = store.load(slot::TASKS).unwrap();
        assert!(missing.is_none());

        fs::write(store.slot_path(slot::TASKS), "{not json").unwrap();
        let err = store.load::<TaskList>(slot::TASKS).unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref slot, .. } if slot == "tasks"));
    }

    #[test]
    fn test_purge_removes_all_slots() {
        let (_dir, store) = store();
        store.save(slot::LAST_SCHEDULE, &"09:00 deep work").unwrap();
        store.save(slot::SYLLABUS, &SyllabusProgress::new()).unwrap();
        assert!(store.slot_path(slot::LAST_SCHEDULE).exists());

        store.purge().unwrap();
        for s in slot::ALL {
            assert!(!store.slot_path(s).exists());
        }
        // purging an already-empty store is fine
        store.purge().unwrap();
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("state").join("deep");
        let store = StateStore::open(&nested).unwrap();
        assert!(nested.exists());
        store.save(slot::TASKS, &TaskList::new()).unwrap();
    }
}
