//! Snapshot writer
//!
//! Serializes the three datasets into a timestamped snapshot directory of
//! JSON artifacts plus a metadata record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{OpsdeskError, OpsdeskResult};
use crate::store::Datasets;

/// Prefix of every snapshot directory name
pub const SNAPSHOT_PREFIX: &str = "backup_";

/// Artifact holding the work orders dataset
pub const WORK_ORDERS_FILE: &str = "work_orders.json";
/// Artifact holding the quotes dataset
pub const QUOTES_FILE: &str = "quotes.json";
/// Artifact holding the ledger entries dataset
pub const LEDGER_ENTRIES_FILE: &str = "ledger_entries.json";
/// Artifact holding the snapshot metadata
pub const METADATA_FILE: &str = "metadata.json";

/// Metadata written alongside each snapshot's artifacts
///
/// `timestamp` and `created_at` are stamped from the same wall-clock read:
/// `timestamp` at second resolution (it doubles as the directory name suffix
/// and the catalog sort key), `created_at` as a full ISO-8601 instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Snapshot id in `YYYYMMDD_HHMMSS` form
    pub timestamp: String,
    /// Creation instant with timezone offset
    pub created_at: DateTime<Local>,
    /// Work order count at write time
    pub work_orders: usize,
    /// Quote count at write time
    pub quotes: usize,
    /// Ledger entry count at write time
    pub ledger_entries: usize,
}

/// Create a snapshot of the given datasets under the backup root
///
/// Creates the backup root if absent, then a fresh `backup_<timestamp>`
/// directory, one artifact per dataset, and the metadata record. Returns the
/// absolute path of the new snapshot directory.
///
/// Timestamps have one-second resolution; if a snapshot directory for the
/// current second already exists the call fails with a storage error instead
/// of writing into it. I/O failures propagate and no partial cleanup is
/// attempted, so a half-written directory may remain.
pub fn create_snapshot(backup_root: &Path, data: &Datasets) -> OpsdeskResult<PathBuf> {
    fs::create_dir_all(backup_root)
        .map_err(|e| OpsdeskError::Io(format!("Failed to create backup root: {}", e)))?;

    let now = Local::now();
    let timestamp = now.format("%Y%m%d_%H%M%S").to_string();
    let snapshot_dir = backup_root.join(format!("{}{}", SNAPSHOT_PREFIX, timestamp));

    // create_dir (not create_dir_all) so a same-second collision is refused
    fs::create_dir(&snapshot_dir).map_err(|e| {
        OpsdeskError::Storage(format!(
            "Failed to create snapshot directory {}: {}",
            snapshot_dir.display(),
            e
        ))
    })?;

    write_artifact(&snapshot_dir.join(WORK_ORDERS_FILE), &data.work_orders)?;
    write_artifact(&snapshot_dir.join(QUOTES_FILE), &data.quotes)?;
    write_artifact(&snapshot_dir.join(LEDGER_ENTRIES_FILE), &data.ledger_entries)?;

    let metadata = SnapshotMetadata {
        timestamp,
        created_at: now,
        work_orders: data.work_orders.len(),
        quotes: data.quotes.len(),
        ledger_entries: data.ledger_entries.len(),
    };
    write_artifact(&snapshot_dir.join(METADATA_FILE), &metadata)?;

    tracing::info!(path = %snapshot_dir.display(), "snapshot created");

    Ok(fs::canonicalize(&snapshot_dir).unwrap_or(snapshot_dir))
}

/// Write one pretty-printed JSON artifact
///
/// serde_json leaves non-ASCII characters unescaped, so client names and
/// descriptions stay human-readable in the artifact files.
fn write_artifact<T: Serialize>(path: &Path, value: &T) -> OpsdeskResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| OpsdeskError::Json(format!("Failed to serialize artifact: {}", e)))?;

    fs::write(path, json).map_err(|e| {
        OpsdeskError::Io(format!("Failed to write artifact {}: {}", path.display(), e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Record;
    use tempfile::TempDir;

    #[test]
    fn test_create_snapshot_writes_all_artifacts() {
        let temp = TempDir::new().unwrap();
        let data = Datasets::with_sample_data();

        let path = create_snapshot(temp.path(), &data).unwrap();

        assert!(path.is_dir());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(SNAPSHOT_PREFIX));
        assert!(path.join(WORK_ORDERS_FILE).exists());
        assert!(path.join(QUOTES_FILE).exists());
        assert!(path.join(LEDGER_ENTRIES_FILE).exists());
        assert!(path.join(METADATA_FILE).exists());
    }

    #[test]
    fn test_metadata_counts_match_datasets() {
        let temp = TempDir::new().unwrap();
        let mut data = Datasets::with_sample_data();
        data.work_orders.push(Record::new());

        let path = create_snapshot(temp.path(), &data).unwrap();

        let contents = fs::read_to_string(path.join(METADATA_FILE)).unwrap();
        let metadata: SnapshotMetadata = serde_json::from_str(&contents).unwrap();

        assert_eq!(metadata.work_orders, 3);
        assert_eq!(metadata.quotes, 2);
        assert_eq!(metadata.ledger_entries, 2);
        assert_eq!(
            metadata.timestamp,
            metadata.created_at.format("%Y%m%d_%H%M%S").to_string()
        );
    }

    #[test]
    fn test_snapshot_of_empty_datasets() {
        let temp = TempDir::new().unwrap();
        let data = Datasets::new();

        let path = create_snapshot(temp.path(), &data).unwrap();

        let contents = fs::read_to_string(path.join(WORK_ORDERS_FILE)).unwrap();
        let records: Vec<Record> = serde_json::from_str(&contents).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_artifact_preserves_non_ascii() {
        let temp = TempDir::new().unwrap();
        let data = Datasets::with_sample_data();

        let path = create_snapshot(temp.path(), &data).unwrap();

        let contents = fs::read_to_string(path.join(WORK_ORDERS_FILE)).unwrap();
        assert!(contents.contains("João Silva"));
    }

    #[test]
    fn test_creates_missing_backup_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("backups");
        let data = Datasets::new();

        let path = create_snapshot(&root, &data).unwrap();
        assert!(path.exists());
    }
}
