//! Persisted résumé state.
//!
//! A store maps a key to a serialized [`ResumeRecord`]. Loading never fails
//! on bad data: anything that does not parse as a record is logged and
//! treated as "nothing saved".

use crate::error::{Error, Result};
use crate::model::ResumeRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the CLI and session use when none is given.
pub const DEFAULT_KEY: &str = "resumeData";

/// Key/value persistence for résumé records.
pub trait StateStore {
    /// Save a record under `key`, replacing any previous value.
    fn save(&self, key: &str, record: &ResumeRecord) -> Result<()>;

    /// Load the record saved under `key`.
    ///
    /// Returns `None` when nothing is saved or the saved data is malformed.
    fn load(&self, key: &str) -> Option<ResumeRecord>;
}

/// Parse a stored blob strictly.
pub fn decode_record(blob: &str) -> Result<ResumeRecord> {
    serde_json::from_str::<ResumeRecord>(blob)
        .map(ResumeRecord::normalized)
        .map_err(|e| Error::MalformedPersistedState(e.to_string()))
}

/// Parse a stored blob, treating malformed data as absent.
pub fn decode_or_absent(key: &str, blob: &str) -> Option<ResumeRecord> {
    match decode_record(blob) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("Ignoring saved state '{}': {}", key, e);
            None
        }
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl StateStore for FileStore {
    fn save(&self, key: &str, record: &ResumeRecord) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(self.path_for(key), json)?;
        log::debug!("Saved '{}' to {}", key, self.dir.display());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<ResumeRecord> {
        let path = self.path_for(key);
        let blob = match std::fs::read_to_string(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };
        decode_or_absent(key, &blob)
    }
}

/// In-process store holding raw JSON blobs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw blob under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: &str, blob: impl Into<String>) {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(key.to_string(), blob.into());
        }
    }

    /// Raw blob saved under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.lock().ok()?.get(key).cloned()
    }
}

impl StateStore for MemoryStore {
    fn save(&self, key: &str, record: &ResumeRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.blobs
            .lock()
            .map_err(|_| Error::Io(std::io::Error::other("store lock poisoned")))?
            .insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Option<ResumeRecord> {
        let blob = self.raw(key)?;
        decode_or_absent(key, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExperienceEntry;
    use tempfile::TempDir;

    fn sample() -> ResumeRecord {
        let mut record = ResumeRecord::new();
        record.personal.full_name = "Ada Lovelace".into();
        record.skills = vec!["Math".into()];
        record.experience.push(ExperienceEntry {
            job_title: "Analyst".into(),
            current: true,
            ..Default::default()
        });
        record
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state"));
        store.save(DEFAULT_KEY, &sample()).unwrap();
        assert_eq!(store.load(DEFAULT_KEY), Some(sample()));
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load("nothing"), None);
    }

    #[test]
    fn test_malformed_blob_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path_for(DEFAULT_KEY), "{not json").unwrap();
        assert_eq!(store.load(DEFAULT_KEY), None);

        let memory = MemoryStore::new();
        memory.insert_raw(DEFAULT_KEY, r#"{"skills": "not a list"}"#);
        assert_eq!(memory.load(DEFAULT_KEY), None);
    }

    #[test]
    fn test_missing_keys_default() {
        let memory = MemoryStore::new();
        memory.insert_raw(DEFAULT_KEY, r#"{"personal": {"fullName": "Ada"}}"#);
        let record = memory.load(DEFAULT_KEY).unwrap();
        assert_eq!(record.personal.full_name, "Ada");
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_loaded_records_are_normalized() {
        let memory = MemoryStore::new();
        memory.insert_raw(
            DEFAULT_KEY,
            r#"{"experience": [{"jobTitle": ""}, {"jobTitle": "Analyst"}], "skills": ["", "Go"]}"#,
        );
        let record = memory.load(DEFAULT_KEY).unwrap();
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.skills, vec!["Go".to_string()]);
    }

    #[test]
    fn test_decode_record_reports_error() {
        let err = decode_record("[]").err().unwrap();
        assert!(matches!(err, Error::MalformedPersistedState(_)));
    }

    #[test]
    fn test_path_sanitizes_key() {
        let store = FileStore::new("/tmp/x");
        assert_eq!(store.path_for("../evil"), PathBuf::from("/tmp/x/___evil.json"));
    }
}
