//! Application context
//!
//! One explicitly constructed object owning the shared state: the three
//! datasets, the user and session stores, the settings, and the backup root.
//! Built once at startup and cloned into the HTTP layer and the backup
//! scheduler, instead of hiding the state in process-wide singletons.

use std::path::PathBuf;
use std::sync::{Arc, MutexGuard};

use crate::auth::{SessionStore, UserStore};
use crate::config::{OpsdeskPaths, Settings};
use crate::error::OpsdeskResult;
use crate::store::{lock_datasets, Datasets, SharedDatasets};

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct AppContext {
    /// The three live datasets behind one lock
    pub datasets: SharedDatasets,
    /// User accounts
    pub users: Arc<UserStore>,
    /// Live bearer tokens
    pub sessions: Arc<SessionStore>,
    /// Server settings
    pub settings: Arc<Settings>,
    /// Root directory for snapshots
    pub backup_root: PathBuf,
}

impl AppContext {
    /// Build the context from resolved paths, settings, and initial data
    pub fn new(
        paths: &OpsdeskPaths,
        settings: Settings,
        datasets: Datasets,
    ) -> OpsdeskResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            datasets: datasets.into_shared(),
            users: Arc::new(UserStore::with_demo_users()?),
            sessions: Arc::new(SessionStore::new(settings.token_ttl_hours)),
            backup_root: paths.backup_dir(),
            settings: Arc::new(settings),
        })
    }

    /// Lock the datasets for a critical section
    pub fn datasets(&self) -> MutexGuard<'_, Datasets> {
        lock_datasets(&self.datasets)
    }
}
