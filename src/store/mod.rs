//! In-memory record store for opsdesk
//!
//! The server keeps three ordered datasets in memory: work orders, quotes,
//! and ledger entries. Records are schemaless JSON objects so that restored
//! snapshots and hand-posted payloads round-trip without a fixed schema.
//! All three datasets live behind a single mutex; the HTTP handlers and the
//! backup scheduler take the lock around snapshot reads and restore refills.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};

/// A single schemaless record: field name to JSON value
pub type Record = serde_json::Map<String, Value>;

/// The three live datasets, guarded as one unit
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Datasets {
    /// Work orders (projects module)
    pub work_orders: Vec<Record>,
    /// Quotes (sales module)
    pub quotes: Vec<Record>,
    /// Financial ledger entries (finance module)
    pub ledger_entries: Vec<Record>,
}

/// Shared handle to the datasets, cloned into handlers and scheduler jobs
pub type SharedDatasets = Arc<Mutex<Datasets>>;

impl Datasets {
    /// Create empty datasets
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap datasets in a shared handle
    pub fn into_shared(self) -> SharedDatasets {
        Arc::new(Mutex::new(self))
    }

    /// Create datasets seeded with demo records
    pub fn with_sample_data() -> Self {
        let work_orders = vec![
            as_record(json!({
                "id": 1,
                "client": "João Silva",
                "product": "Fixed Polycarbonate Cover",
                "status": "Awaiting Measurement",
                "created_date": "2024-01-15",
                "scheduled_for": "2024-01-20 10:00"
            })),
            as_record(json!({
                "id": 2,
                "client": "Maria Santos",
                "product": "Canvas Awning",
                "status": "In Production",
                "created_date": "2024-01-10",
                "scheduled_for": "2024-01-25 14:00"
            })),
        ];

        let quotes = vec![
            as_record(json!({
                "id": 1,
                "client": "João Silva",
                "product": "Fixed Polycarbonate Cover",
                "value": 2500.00,
                "sent_date": "2024-01-15",
                "status": "sent",
                "valid_until": "2024-02-15"
            })),
            as_record(json!({
                "id": 2,
                "client": "Maria Santos",
                "product": "Canvas Awning",
                "value": 1200.00,
                "sent_date": "2024-01-20",
                "status": "approved",
                "valid_until": "2024-02-20"
            })),
        ];

        let ledger_entries = vec![
            as_record(json!({
                "id": 1,
                "kind": "receivable",
                "description": "Payment João Silva - Polycarbonate Cover",
                "value": 2500.00,
                "due_date": "2024-02-01",
                "paid_date": null,
                "status": "pending",
                "category": "sale"
            })),
            as_record(json!({
                "id": 2,
                "kind": "payable",
                "description": "Polycarbonate purchase",
                "value": 800.00,
                "due_date": "2024-01-25",
                "paid_date": "2024-01-20",
                "status": "paid",
                "category": "supplier"
            })),
        ];

        Self {
            work_orders,
            quotes,
            ledger_entries,
        }
    }

    /// Next sequential id for a dataset
    pub fn next_id(records: &[Record]) -> u64 {
        records.len() as u64 + 1
    }
}

/// Lock a shared dataset handle, recovering from a poisoned lock
///
/// A panic inside a critical section must not wedge the server for good, so
/// a poisoned mutex is recovered by taking the inner data as-is.
pub fn lock_datasets(shared: &SharedDatasets) -> MutexGuard<'_, Datasets> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Convert a `json!` object literal into a Record
fn as_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Read a string field from a record
pub fn str_field<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// Read a numeric field from a record, defaulting to zero
pub fn num_field(record: &Record, key: &str) -> f64 {
    record.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Read an integer id field from a record
pub fn id_field(record: &Record, key: &str) -> Option<u64> {
    record.get(key).and_then(Value::as_u64)
}
