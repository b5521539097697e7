//! Path management for opsdesk
//!
//! Resolves the directories used by the server: a base data directory,
//! the backup root beneath it, and the settings file.
//!
//! ## Path Resolution Order
//!
//! 1. `OPSDESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_DATA_HOME/opsdesk` or `~/.local/share/opsdesk`
//! 3. Windows: `%APPDATA%\opsdesk`

use std::path::PathBuf;

use crate::error::OpsdeskError;

/// Manages all paths used by opsdesk
#[derive(Debug, Clone)]
pub struct OpsdeskPaths {
    /// Base directory for all opsdesk data
    base_dir: PathBuf,
}

impl OpsdeskPaths {
    /// Create a new OpsdeskPaths instance
    ///
    /// Path resolution:
    /// 1. `OPSDESK_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_DATA_HOME/opsdesk` or `~/.local/share/opsdesk`
    /// 3. Windows: `%APPDATA%\opsdesk`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, OpsdeskError> {
        let base_dir = if let Ok(custom) = std::env::var("OPSDESK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OpsdeskPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the backup root directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory
    /// - Backup root directory
    pub fn ensure_directories(&self) -> Result<(), OpsdeskError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| OpsdeskError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| OpsdeskError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, OpsdeskError> {
    // Unix (Linux/macOS): Use XDG_DATA_HOME if set, otherwise ~/.local/share
    let data_base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".local").join("share")
        });
    Ok(data_base.join("opsdesk"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, OpsdeskError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| OpsdeskError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("opsdesk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsdeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsdeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.backup_dir().exists());
    }
}
