//! End-to-end tests for the backup engine: snapshot, catalog, restore, and
//! retention working against a real filesystem.

use std::fs;
use std::path::Path;

use chrono::{Duration, Local};
use tempfile::TempDir;

use opsdesk::backup::{
    clean_old_snapshots, create_snapshot, list_snapshots, restore_snapshot, SnapshotMetadata,
    LEDGER_ENTRIES_FILE, METADATA_FILE, QUOTES_FILE, SNAPSHOT_PREFIX, WORK_ORDERS_FILE,
};
use opsdesk::store::{Datasets, Record};

/// Fabricate a snapshot directory with full artifacts and a chosen age
fn snapshot_aged(root: &Path, suffix: &str, age_days: i64, data: &Datasets) {
    let created_at = Local::now() - Duration::days(age_days);
    let timestamp = created_at.format("%Y%m%d_%H%M%S").to_string();
    let dir = root.join(format!("{}{}_{}", SNAPSHOT_PREFIX, timestamp, suffix));
    fs::create_dir_all(&dir).unwrap();

    let artifacts = [
        (WORK_ORDERS_FILE, &data.work_orders),
        (QUOTES_FILE, &data.quotes),
        (LEDGER_ENTRIES_FILE, &data.ledger_entries),
    ];
    for (file, records) in artifacts {
        fs::write(dir.join(file), serde_json::to_string_pretty(records).unwrap()).unwrap();
    }

    let metadata = SnapshotMetadata {
        timestamp,
        created_at,
        work_orders: data.work_orders.len(),
        quotes: data.quotes.len(),
        ledger_entries: data.ledger_entries.len(),
    };
    fs::write(
        dir.join(METADATA_FILE),
        serde_json::to_string_pretty(&metadata).unwrap(),
    )
    .unwrap();
}

#[test]
fn snapshot_restore_round_trip_survives_live_mutation() {
    let temp = TempDir::new().unwrap();
    let mut live = Datasets::with_sample_data();

    let path = create_snapshot(temp.path(), &live).unwrap();
    let frozen = live.clone();

    // Keep mutating the live data the way request handlers would
    live.work_orders.clear();
    live.quotes.push(Record::new());
    live.ledger_entries.remove(0);

    assert!(restore_snapshot(&path, &mut live));
    assert_eq!(live, frozen);
}

#[test]
fn catalog_reflects_snapshot_metadata() {
    let temp = TempDir::new().unwrap();
    let data = Datasets::with_sample_data();

    let path = create_snapshot(temp.path(), &data).unwrap();

    let entries = list_snapshots(temp.path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].location.canonicalize().unwrap(), path);
    assert_eq!(entries[0].metadata.work_orders, 2);
    assert_eq!(entries[0].metadata.quotes, 2);
    assert_eq!(entries[0].metadata.ledger_entries, 2);
    assert!(entries[0].name.starts_with(SNAPSHOT_PREFIX));
}

#[test]
fn catalog_orders_across_ages_and_tolerates_orphans() {
    let temp = TempDir::new().unwrap();
    let data = Datasets::new();

    snapshot_aged(temp.path(), "a", 3, &data);
    snapshot_aged(temp.path(), "b", 1, &data);
    snapshot_aged(temp.path(), "c", 2, &data);
    // A directory without metadata never shows up
    fs::create_dir(temp.path().join("backup_20240101_000000")).unwrap();

    let entries = list_snapshots(temp.path()).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].name.ends_with("b"));
    assert!(entries[1].name.ends_with("c"));
    assert!(entries[2].name.ends_with("a"));
}

#[test]
fn retention_sweep_respects_the_boundary() {
    let temp = TempDir::new().unwrap();
    let data = Datasets::new();

    snapshot_aged(temp.path(), "ancient", 31, &data);
    snapshot_aged(temp.path(), "boundary", 30, &data);
    snapshot_aged(temp.path(), "fresh", 1, &data);

    let removed = clean_old_snapshots(temp.path(), 30).unwrap();
    assert_eq!(removed, 1);

    let names: Vec<String> = list_snapshots(temp.path())
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.ends_with("boundary")));
    assert!(names.iter().any(|n| n.ends_with("fresh")));
    assert!(!names.iter().any(|n| n.ends_with("ancient")));
}

#[test]
fn restore_from_an_aged_snapshot_still_works() {
    let temp = TempDir::new().unwrap();
    let data = Datasets::with_sample_data();

    snapshot_aged(temp.path(), "old", 10, &data);
    let entry = list_snapshots(temp.path()).unwrap().remove(0);

    let mut target = Datasets::new();
    assert!(restore_snapshot(&entry.location, &mut target));
    assert_eq!(target, data);
}

#[test]
fn failed_restore_never_mixes_states() {
    let temp = TempDir::new().unwrap();
    let data = Datasets::with_sample_data();

    let path = create_snapshot(temp.path(), &data).unwrap();
    // Corrupt only the last artifact read; earlier ones parse fine
    fs::write(path.join(LEDGER_ENTRIES_FILE), "[{").unwrap();

    let mut target = Datasets::new();
    target.quotes.push(Record::new());
    let before = target.clone();

    assert!(!restore_snapshot(&path, &mut target));
    assert_eq!(target, before);
}
