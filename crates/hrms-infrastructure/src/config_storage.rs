//! Backend configuration file storage.

use crate::paths::HrmsPaths;
use crate::storage::atomic_toml::AtomicTomlFile;
use hrms_core::config::ApiConfig;
use hrms_core::error::Result;
use std::path::PathBuf;

/// Loads and saves the backend API configuration (`config.toml`).
///
/// A missing file is not an error: deployments without a config file run on
/// the compiled-in defaults.
pub struct ConfigStorage {
    file: AtomicTomlFile<ApiConfig>,
}

impl ConfigStorage {
    /// Creates a storage at the default path (`~/.config/hrms/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(HrmsPaths::config_file()?))
    }

    /// Creates a storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// absent or empty.
    pub fn load(&self) -> Result<ApiConfig> {
        match self.file.load()? {
            Some(config) => Ok(config),
            None => {
                tracing::debug!(
                    "no config file at {}, using defaults",
                    self.file.path().display()
                );
                Ok(ApiConfig::default())
            }
        }
    }

    /// Saves the configuration atomically.
    pub fn save(&self, config: &ApiConfig) -> Result<()> {
        self.file.save(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));

        let config = storage.load().unwrap();
        assert_eq!(config.token_key, "accessToken");
        assert_eq!(config.endpoints.login, "/auth/login");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));

        let mut config = ApiConfig::default();
        config.base_url = "https://hr.example.com/api/v1".to_string();
        storage.save(&config).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.base_url, "https://hr.example.com/api/v1");
        assert_eq!(loaded.timeout_ms, 30_000);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        let storage = ConfigStorage::with_path(path);
        assert!(storage.load().is_err());
    }
}
