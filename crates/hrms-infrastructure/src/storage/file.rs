//! File-backed session storage.

use super::atomic_toml::AtomicTomlFile;
use crate::paths::HrmsPaths;
use hrms_core::error::Result;
use hrms_core::session::storage::SessionStorage;
use std::collections::HashMap;
use std::path::PathBuf;

/// Durable key/value store over a single TOML map file.
///
/// Used when session state must survive a client restart. Every write is a
/// locked read-modify-write through [`AtomicTomlFile::update`], so
/// concurrent client processes cannot tear the file.
pub struct FileSessionStorage {
    file: AtomicTomlFile<HashMap<String, String>>,
}

impl FileSessionStorage {
    /// Creates a storage at the default path (`~/.config/hrms/session.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(HrmsPaths::session_file()?))
    }

    /// Creates a storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    fn entries(&self) -> HashMap<String, String> {
        match self.file.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => HashMap::new(),
            Err(err) => {
                tracing::warn!("failed to read session file, treating as empty: {err}");
                HashMap::new()
            }
        }
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.file.update(HashMap::new(), |entries| {
            entries.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file.update(HashMap::new(), |entries| {
            entries.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");

        let storage = FileSessionStorage::with_path(path.clone());
        storage.set("accessToken", "tok-1").unwrap();
        storage.set("scopes", "[\"leave.view\"]").unwrap();

        // A fresh handle over the same file sees the persisted state.
        let reopened = FileSessionStorage::with_path(path);
        assert_eq!(reopened.get("accessToken"), Some("tok-1".to_string()));
        assert_eq!(reopened.get("scopes"), Some("[\"leave.view\"]".to_string()));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::with_path(temp_dir.path().join("session.toml"));

        storage.set("sessionId", "sid-1").unwrap();
        storage.remove("sessionId").unwrap();
        assert_eq!(storage.get("sessionId"), None);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::with_path(temp_dir.path().join("absent.toml"));
        assert_eq!(storage.get("accessToken"), None);
    }
}
