//! Backup scheduler
//!
//! Runs the recurring backup jobs for the lifetime of the process: a daily
//! snapshot at 02:00 local time and a weekly retention sweep on Sunday at
//! 03:00 local time. Each job is a (schedule, callback) pair driven by its
//! own timer task; a failed run is logged and the timer keeps going, and
//! fires missed while the process was down are skipped rather than caught up.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Weekday};
use tokio::task::JoinHandle;

use crate::error::OpsdeskResult;
use crate::store::{lock_datasets, SharedDatasets};

use super::retention::clean_old_snapshots;
use super::snapshot::create_snapshot;

/// When a recurring job fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSchedule {
    /// Every day at the given local time
    Daily { hour: u32, minute: u32 },
    /// Every week on the given weekday at the given local time
    Weekly {
        weekday: Weekday,
        hour: u32,
        minute: u32,
    },
}

impl JobSchedule {
    /// Compute the first fire time strictly after the given instant
    ///
    /// Days where the scheduled wall-clock time does not exist (DST spring
    /// forward) are skipped; for an ambiguous time the earlier offset wins.
    pub fn next_fire(&self, after: DateTime<Local>) -> DateTime<Local> {
        let (wanted_weekday, hour, minute) = match *self {
            JobSchedule::Daily { hour, minute } => (None, hour, minute),
            JobSchedule::Weekly {
                weekday,
                hour,
                minute,
            } => (Some(weekday), hour, minute),
        };

        let mut date = after.date_naive();
        loop {
            if wanted_weekday.map_or(true, |weekday| date.weekday() == weekday) {
                if let Some(candidate) = local_at(date, hour, minute) {
                    if candidate > after {
                        return candidate;
                    }
                }
            }
            date += Duration::days(1);
        }
    }
}

/// Resolve a local wall-clock time on a given date, if it exists
fn local_at(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    Local.from_local_datetime(&naive).earliest()
}

/// Owns the background timer tasks for the recurring backup jobs
///
/// Started once at process startup and kept alive for the lifetime of the
/// process; there is no shutdown contract beyond process exit, though
/// [`BackupScheduler::abort`] exists for tests.
pub struct BackupScheduler {
    handles: Vec<JoinHandle<()>>,
}

impl BackupScheduler {
    /// Start the daily backup and weekly cleanup jobs
    ///
    /// The jobs hold the shared dataset handle for the process lifetime. The
    /// daily snapshot reads the datasets under the store lock; the weekly
    /// sweep runs with the configured retention window.
    pub fn start(datasets: SharedDatasets, backup_root: PathBuf, retention_days: i64) -> Self {
        let mut scheduler = Self {
            handles: Vec::new(),
        };

        let data = datasets;
        let root = backup_root.clone();
        scheduler.register(
            "daily_backup",
            JobSchedule::Daily { hour: 2, minute: 0 },
            move || create_snapshot(&root, &lock_datasets(&data)).map(|_| ()),
        );

        scheduler.register(
            "weekly_cleanup",
            JobSchedule::Weekly {
                weekday: Weekday::Sun,
                hour: 3,
                minute: 0,
            },
            move || {
                let removed = clean_old_snapshots(&backup_root, retention_days)?;
                tracing::info!(removed, "weekly cleanup finished");
                Ok(())
            },
        );

        tracing::info!("backup scheduler started");
        scheduler
    }

    /// Register one recurring job on its own timer task
    ///
    /// The jobs do filesystem I/O, so each invocation runs on the blocking
    /// pool rather than a runtime worker.
    fn register<F>(&mut self, name: &'static str, schedule: JobSchedule, job: F)
    where
        F: Fn() -> OpsdeskResult<()> + Send + Sync + 'static,
    {
        let job = Arc::new(job);
        let handle = tokio::spawn(async move {
            loop {
                let now = Local::now();
                let fire_at = schedule.next_fire(now);
                let wait = (fire_at - now).to_std().unwrap_or_default();
                tracing::debug!(job = name, fire_at = %fire_at, "next scheduled run");

                tokio::time::sleep(wait).await;

                let job = Arc::clone(&job);
                let run = tokio::task::spawn_blocking(move || run_job(name, &*job));
                if let Err(e) = run.await {
                    tracing::error!(job = name, error = %e, "scheduled job panicked");
                }
            }
        });
        self.handles.push(handle);
    }

    /// Abort all timer tasks (used by tests; production relies on process exit)
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// Run one job invocation, isolating failures from the timer loop
fn run_job<F>(name: &'static str, job: &F)
where
    F: Fn() -> OpsdeskResult<()>,
{
    tracing::info!(job = name, "running scheduled job");
    if let Err(e) = job() {
        tracing::error!(job = name, error = %e, "scheduled job failed");
    }
}
