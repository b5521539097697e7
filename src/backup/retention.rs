//! Retention sweeper
//!
//! Deletes snapshots strictly older than the retention window. The sweep is
//! best-effort: a snapshot that fails to delete is logged and skipped, and
//! the remaining snapshots are still processed.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::OpsdeskResult;

use super::catalog::list_snapshots;

/// Remove snapshots older than `retention_days` whole days
///
/// Age is measured in whole elapsed days between now and the snapshot's
/// `created_at`; a snapshot is removed only when that age strictly exceeds
/// the window, so one aged exactly `retention_days` days survives. Returns
/// the count of snapshots actually removed.
pub fn clean_old_snapshots(backup_root: &Path, retention_days: i64) -> OpsdeskResult<usize> {
    let now = Local::now();
    let mut removed = 0;

    for entry in list_snapshots(backup_root)? {
        let age_days = now.signed_duration_since(entry.metadata.created_at).num_days();
        if age_days <= retention_days {
            continue;
        }

        match fs::remove_dir_all(&entry.location) {
            Ok(()) => {
                tracing::info!(snapshot = %entry.name, age_days, "old snapshot removed");
                removed += 1;
            }
            Err(e) => {
                tracing::warn!(snapshot = %entry.name, error = %e, "failed to remove snapshot");
            }
        }
    }

    Ok(removed)
}
