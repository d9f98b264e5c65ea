use crate::domain::DropdownState;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed state file: {0}")]
    Format(#[from] serde_json::Error),
}

/// File-backed key-value store for dropdown state records.
///
/// The file holds the whole record table as JSON; `load_state` looks a
/// record up by id and `save_state` upserts one. Not-found is `Ok(None)`,
/// never an error.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store over the given file. Cheap; no I/O happens until
    /// the first load or save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-user default location of the state file.
    pub fn default_path() -> PathBuf {
        match dirs::data_dir() {
            Some(base) => base.join("funsel").join("state.json"),
            None => PathBuf::from("funsel-state.json"),
        }
    }

    pub fn load_state(&self, id: u32) -> Result<Option<DropdownState>, StoreError> {
        let records = self.read_records()?;
        Ok(records.into_iter().find(|record| record.id == id))
    }

    pub fn save_state(&self, state: &DropdownState) -> Result<(), StoreError> {
        // A malformed table cannot be preserved; saving starts a fresh one,
        // so the store heals itself after a corrupt or torn write.
        let mut records = self.read_records().unwrap_or_default();
        match records.iter_mut().find(|record| record.id == state.id) {
            Some(existing) => *existing = state.clone(),
            None => records.push(state.clone()),
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<DropdownState>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SelectionIndex, STATE_RECORD_ID};
    use tempfile::tempdir;

    fn sample_state() -> DropdownState {
        let mut index = SelectionIndex::default();
        index.insert("Продажи", "Переговоры");
        index.insert("Продажи", "Успешно");
        index.insert("Партнеры", "Неразобранное");
        index.to_state()
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json"));
        let state = sample_state();

        store.save_state(&state).unwrap();
        let loaded = store.load_state(STATE_RECORD_ID).unwrap().unwrap();

        assert_eq!(loaded, state);
        assert_eq!(
            SelectionIndex::from_state(&loaded),
            SelectionIndex::from_state(&state)
        );
    }

    #[test]
    fn test_load_absent_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("missing.json"));
        assert_eq!(store.load_state(STATE_RECORD_ID).unwrap(), None);
    }

    #[test]
    fn test_load_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json"));
        store.save_state(&sample_state()).unwrap();

        assert_eq!(store.load_state(2).unwrap(), None);
    }

    #[test]
    fn test_repeated_save_leaves_identical_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::open(&path);
        let state = sample_state();

        store.save_state(&state).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        store.save_state(&state).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_save_upserts_by_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::open(&path);

        store.save_state(&sample_state()).unwrap();

        let mut index = SelectionIndex::default();
        index.insert("Ивент", "Успешно");
        let replacement = index.to_state();
        store.save_state(&replacement).unwrap();

        let records: Vec<DropdownState> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], replacement);
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json at all").unwrap();

        let store = StateStore::open(&path);
        assert!(matches!(
            store.load_state(STATE_RECORD_ID),
            Err(StoreError::Format(_))
        ));
    }

    #[test]
    fn test_save_heals_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ torn write").unwrap();

        let store = StateStore::open(&path);
        let state = sample_state();
        store.save_state(&state).unwrap();

        assert_eq!(store.load_state(STATE_RECORD_ID).unwrap(), Some(state));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let store = StateStore::open(&path);

        store.save_state(&sample_state()).unwrap();
        assert!(path.exists());
    }
}
