//! Restore engine
//!
//! Loads a snapshot's artifacts back into the live datasets. The restore is
//! all-or-nothing from the caller's perspective: every artifact is parsed
//! before any dataset is touched, so a failure leaves the live data intact.

use std::fs;
use std::path::Path;

use crate::error::{OpsdeskError, OpsdeskResult};
use crate::store::{Datasets, Record};

use super::snapshot::{LEDGER_ENTRIES_FILE, QUOTES_FILE, WORK_ORDERS_FILE};

/// Restore a snapshot into the live datasets
///
/// Replaces the entire contents of each dataset in place (clear plus bulk
/// append), never rebinding the containers, so every holder of the shared
/// handle observes the restored data. Returns `false` on any read or parse
/// failure, in which case the datasets are left byte-for-byte unmodified.
///
/// Records are not validated beyond structural JSON parsing; a hand-edited
/// artifact with unexpected fields restores as-is.
pub fn restore_snapshot(snapshot_dir: &Path, data: &mut Datasets) -> bool {
    let (work_orders, quotes, ledger_entries) = match read_all_artifacts(snapshot_dir) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(
                path = %snapshot_dir.display(),
                error = %e,
                "snapshot restore failed"
            );
            return false;
        }
    };

    data.work_orders.clear();
    data.work_orders.extend(work_orders);
    data.quotes.clear();
    data.quotes.extend(quotes);
    data.ledger_entries.clear();
    data.ledger_entries.extend(ledger_entries);

    tracing::info!(path = %snapshot_dir.display(), "snapshot restored");
    true
}

/// Parse all three artifacts before any mutation happens
fn read_all_artifacts(
    snapshot_dir: &Path,
) -> OpsdeskResult<(Vec<Record>, Vec<Record>, Vec<Record>)> {
    Ok((
        read_artifact(&snapshot_dir.join(WORK_ORDERS_FILE))?,
        read_artifact(&snapshot_dir.join(QUOTES_FILE))?,
        read_artifact(&snapshot_dir.join(LEDGER_ENTRIES_FILE))?,
    ))
}

/// Read one artifact as a list of records
fn read_artifact(path: &Path) -> OpsdeskResult<Vec<Record>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        OpsdeskError::Io(format!("Failed to read artifact {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        OpsdeskError::Json(format!("Failed to parse artifact {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::create_snapshot;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_restores_content_and_order() {
        let temp = TempDir::new().unwrap();
        let mut original = Datasets::with_sample_data();

        let path = create_snapshot(temp.path(), &original).unwrap();
        let at_snapshot_time = original.clone();

        // Mutations after the snapshot must not leak into the restore
        original.work_orders.clear();
        original.quotes.push(Record::new());

        let mut target = Datasets::new();
        assert!(restore_snapshot(&path, &mut target));
        assert_eq!(target, at_snapshot_time);
    }

    #[test]
    fn test_round_trip_empty_datasets() {
        let temp = TempDir::new().unwrap();
        let empty = Datasets::new();

        let path = create_snapshot(temp.path(), &empty).unwrap();

        let mut target = Datasets::with_sample_data();
        assert!(restore_snapshot(&path, &mut target));
        assert_eq!(target, Datasets::new());
    }

    #[test]
    fn test_corrupt_second_artifact_leaves_targets_unchanged() {
        let temp = TempDir::new().unwrap();
        let original = Datasets::with_sample_data();

        let path = create_snapshot(temp.path(), &original).unwrap();
        fs::write(path.join(QUOTES_FILE), "{ definitely not a record list").unwrap();

        let mut target = Datasets::with_sample_data();
        target.work_orders[0].insert("marker".into(), json!(true));
        let before = target.clone();

        assert!(!restore_snapshot(&path, &mut target));
        assert_eq!(target, before);
    }

    #[test]
    fn test_missing_artifact_fails_without_mutation() {
        let temp = TempDir::new().unwrap();
        let original = Datasets::with_sample_data();

        let path = create_snapshot(temp.path(), &original).unwrap();
        fs::remove_file(path.join(LEDGER_ENTRIES_FILE)).unwrap();

        let mut target = Datasets::with_sample_data();
        let before = target.clone();

        assert!(!restore_snapshot(&path, &mut target));
        assert_eq!(target, before);
    }

    #[test]
    fn test_missing_snapshot_directory_fails() {
        let temp = TempDir::new().unwrap();
        let mut target = Datasets::new();

        assert!(!restore_snapshot(&temp.path().join("backup_gone"), &mut target));
    }

    #[test]
    fn test_schemaless_records_restore_as_is() {
        let temp = TempDir::new().unwrap();
        let original = Datasets::with_sample_data();

        let path = create_snapshot(temp.path(), &original).unwrap();
        fs::write(
            path.join(WORK_ORDERS_FILE),
            r#"[{"weird": {"nested": [1, 2, 3]}}]"#,
        )
        .unwrap();

        let mut target = Datasets::new();
        assert!(restore_snapshot(&path, &mut target));
        assert_eq!(target.work_orders.len(), 1);
        assert!(target.work_orders[0].contains_key("weird"));
    }
}
