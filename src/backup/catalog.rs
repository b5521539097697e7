//! Snapshot catalog
//!
//! Enumerates snapshots under the backup root, newest first. The catalog is
//! computed on every call by scanning the filesystem; nothing is cached.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{OpsdeskError, OpsdeskResult};

use super::snapshot::{SnapshotMetadata, METADATA_FILE, SNAPSHOT_PREFIX};

/// Summary view of one snapshot, listed without loading its artifacts
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// Snapshot directory name (`backup_<timestamp>`)
    pub name: String,
    /// Full path to the snapshot directory
    pub location: PathBuf,
    /// Parsed snapshot metadata
    pub metadata: SnapshotMetadata,
}

/// List all snapshots under the backup root, most recent first
///
/// Only immediate child directories whose name starts with `backup_` are
/// considered. A candidate without a readable, parseable metadata artifact
/// is silently skipped; listing is lenient where restoring is strict. The
/// timestamp format is fixed-width and chronological, so sorting the
/// metadata timestamps as strings sorts snapshots by creation time.
pub fn list_snapshots(backup_root: &Path) -> OpsdeskResult<Vec<CatalogEntry>> {
    if !backup_root.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(backup_root)
        .map_err(|e| OpsdeskError::Io(format!("Failed to read backup root: {}", e)))?
    {
        let dir_entry = dir_entry
            .map_err(|e| OpsdeskError::Io(format!("Failed to read directory entry: {}", e)))?;

        let location = dir_entry.path();
        if !location.is_dir() {
            continue;
        }

        let name = dir_entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(SNAPSHOT_PREFIX) {
            continue;
        }

        let Some(metadata) = read_metadata(&location) else {
            tracing::debug!(snapshot = %name, "skipping snapshot without readable metadata");
            continue;
        };

        entries.push(CatalogEntry {
            name,
            location,
            metadata,
        });
    }

    entries.sort_by(|a, b| b.metadata.timestamp.cmp(&a.metadata.timestamp));

    Ok(entries)
}

/// Read and parse a snapshot's metadata artifact, if possible
fn read_metadata(snapshot_dir: &Path) -> Option<SnapshotMetadata> {
    let contents = fs::read_to_string(snapshot_dir.join(METADATA_FILE)).ok()?;
    serde_json::from_str(&contents).ok()
}
