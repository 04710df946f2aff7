//! Atomic TOML file operations.
//!
//! Provides a thin layer for safe concurrent access to TOML state files.

use hrms_core::error::{HrmsError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to an atomic TOML file.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Consistency**: TOML schema validation on load/save
/// - **Isolation**: File locking prevents concurrent modifications
/// - **Durability**: Explicit fsync before rename
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic TOML file handle.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically.
    ///
    /// Uses a temporary file + atomic rename in the same directory.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;

        // Ensure data reaches disk before the rename makes it visible.
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a transactional update with file locking.
    ///
    /// The update function receives a mutable reference to the current data
    /// (or `default_value` when the file doesn't exist) and the result is
    /// written back atomically.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| HrmsError::io("path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| HrmsError::io("path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| HrmsError::storage(format!("failed to acquire lock: {e}")))?;
        }

        #[cfg(not(unix))]
        {
            // No file locking on non-Unix systems; acceptable for a
            // single-user client.
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestState {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("state.toml");
        let atomic_file = AtomicTomlFile::<TestState>::new(file_path);

        let state = TestState {
            name: "test".to_string(),
            count: 42,
        };

        atomic_file.save(&state).unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let atomic_file =
            AtomicTomlFile::<TestState>::new(temp_dir.path().join("nonexistent.toml"));

        assert!(atomic_file.load().unwrap().is_none());
    }

    #[test]
    fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let atomic_file = AtomicTomlFile::<TestState>::new(temp_dir.path().join("state.toml"));

        let default_state = TestState {
            name: "default".to_string(),
            count: 0,
        };

        atomic_file
            .update(default_state.clone(), |state| {
                state.count += 10;
                Ok(())
            })
            .unwrap();

        atomic_file
            .update(default_state, |state| {
                state.count += 5;
                Ok(())
            })
            .unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded.count, 15);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("state.toml");
        let atomic_file = AtomicTomlFile::<TestState>::new(file_path.clone());

        atomic_file
            .save(&TestState {
                name: "test".to_string(),
                count: 1,
            })
            .unwrap();

        assert!(!temp_dir.path().join(".state.toml.tmp").exists());
        assert!(file_path.exists());
    }
}
