//! Unified path management for HRMS client files.
//!
//! All client-side configuration and persisted session state live under the
//! platform config directory (e.g. `~/.config/hrms/` on Linux).

use hrms_core::error::{HrmsError, Result};
use std::path::PathBuf;

/// Unified path management for the HRMS client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/hrms/              # Config directory
/// ├── config.toml              # Backend API configuration
/// └── session.toml             # Persisted session state (token, user, scopes)
/// ```
pub struct HrmsPaths;

impl HrmsPaths {
    /// Returns the HRMS configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/hrms/`)
    /// - `Err(HrmsError::Config)`: Could not determine the home directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("hrms"))
            .ok_or_else(|| HrmsError::config("cannot find home directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    ///
    /// # Security Note
    ///
    /// The session file holds the bearer token in plaintext; it should carry
    /// restrictive permissions (e.g. 600 on Unix).
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
