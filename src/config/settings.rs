//! Server settings for opsdesk
//!
//! Manages the bind address, session lifetime, and the backup retention
//! window used by the weekly cleanup job.

use serde::{Deserialize, Serialize};

use super::paths::OpsdeskPaths;
use crate::error::OpsdeskError;

/// Server settings for opsdesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Session token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Snapshots strictly older than this many days are removed by the
    /// weekly cleanup job
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_token_ttl_hours() -> i64 {
    8
}

fn default_retention_days() -> i64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            bind_addr: default_bind_addr(),
            token_ttl_hours: default_token_ttl_hours(),
            retention_days: default_retention_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &OpsdeskPaths) -> Result<Self, OpsdeskError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| OpsdeskError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                OpsdeskError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OpsdeskPaths) -> Result<(), OpsdeskError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| OpsdeskError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| OpsdeskError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
