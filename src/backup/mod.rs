//! Backup system for opsdesk
//!
//! Snapshots the three in-memory datasets to disk, restores them, lists
//! what exists, and sweeps old snapshots on a schedule.
//!
//! # Snapshot Format
//!
//! Each snapshot is a directory named `backup_<YYYYMMDD_HHMMSS>` under the
//! backup root, containing one pretty-printed JSON artifact per dataset
//! (`work_orders.json`, `quotes.json`, `ledger_entries.json`) plus a
//! `metadata.json` with the snapshot timestamp, creation instant, and the
//! record count of each dataset at write time.
//!
//! # Error Policy
//!
//! - `create_snapshot` and `list_snapshots` propagate I/O failures to the
//!   caller; a half-written snapshot directory may remain after a failure.
//! - `restore_snapshot` never propagates: it parses every artifact before
//!   touching the live datasets and reports success as a bool, so a failed
//!   restore leaves the datasets exactly as they were.
//! - `clean_old_snapshots` logs per-snapshot deletion failures and keeps
//!   sweeping; it returns the number of snapshots actually removed.
//!
//! # Scheduling
//!
//! [`BackupScheduler`] runs a daily snapshot at 02:00 local time and a
//! weekly cleanup on Sunday at 03:00 local time. A failed job run is logged
//! and the timer keeps going; fires missed while the process was down are
//! skipped, not caught up.

mod catalog;
mod restore;
mod retention;
mod scheduler;
mod snapshot;

pub use catalog::{list_snapshots, CatalogEntry};
pub use restore::restore_snapshot;
pub use retention::clean_old_snapshots;
pub use scheduler::{BackupScheduler, JobSchedule};
pub use snapshot::{
    create_snapshot, SnapshotMetadata, LEDGER_ENTRIES_FILE, METADATA_FILE, QUOTES_FILE,
    SNAPSHOT_PREFIX, WORK_ORDERS_FILE,
};
