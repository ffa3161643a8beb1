use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::SchedulerError;
use crate::logging::{self, LogDestination, DEFAULT_LOGS_DIR};
use crate::looper;
use crate::task::{Job, JobId, JobRecord};

/// One live execution context: the loop's running flag plus the handle of
/// the task driving it.
struct RunningJob {
    flag: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Job and running-state tables behind one lock, so registry operations
/// observe both consistently.
#[derive(Default)]
struct Tables {
    jobs: HashMap<JobId, JobRecord>,
    running: HashMap<JobId, RunningJob>,
}

impl Tables {
    fn is_running(&self, id: JobId) -> bool {
        self.running
            .get(&id)
            .is_some_and(|live| live.flag.load(Ordering::Acquire))
    }
}

/// The job registry and lifecycle engine.
///
/// Each started job gets one long-lived tokio task that loops it on its
/// period; per id, executions are strictly sequential, while different ids
/// run fully independently. Misuse of the registry (running a job twice,
/// stopping a stopped one, naming an unknown id) is logged and ignored,
/// never fatal, and never disturbs other ids.
///
/// `run_job` and `run_all` spawn onto the ambient Tokio runtime and must be
/// called from within one.
pub struct Scheduler {
    tables: Mutex<Tables>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create a scheduler logging to the console.
    pub fn new() -> Self {
        // Console installation has no fallible step; a subscriber that is
        // already installed is kept.
        let _ = logging::init(&LogDestination::Console, Path::new(DEFAULT_LOGS_DIR));
        Self::bare()
    }

    /// Create a scheduler logging to `<logs dir>/<name>.log`.
    pub fn with_log_file(name: impl Into<String>) -> Result<Self, SchedulerError> {
        super::SchedulerBuilder::new().log_to_file(name).build()
    }

    pub(crate) fn bare() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // The guarded sections never panic, so a poisoned lock only means a
        // panicking thread died elsewhere while holding it; the data is
        // still usable.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a job under `id`, replacing any previous record for that id.
    ///
    /// Rejected without mutation if the id is currently running: the live
    /// loop still references the old record, and swapping it out would leave
    /// that loop orphaned.
    pub fn add_job<J>(&self, timeout: Duration, period: Duration, job: J, id: JobId)
    where
        J: Job + 'static,
    {
        let mut tables = self.lock();
        if tables.is_running(id) {
            error!(id, "cannot replace a job while it is running");
            return;
        }

        let record = JobRecord::new(id, Arc::new(job), timeout, period);
        tables.jobs.insert(id, record);
        info!(id, ?timeout, ?period, "job registered");
    }

    /// Start the periodic loop for `id`.
    ///
    /// A warning no-op if the id is unknown or already running. At most one
    /// execution context exists per id at any time.
    pub fn run_job(&self, id: JobId) {
        let mut tables = self.lock();

        let Some(record) = tables.jobs.get(&id).cloned() else {
            warn!(id, "run requested for an unregistered job");
            return;
        };
        if tables.is_running(id) {
            warn!(id, "job is already running");
            return;
        }

        let flag = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(looper::run_loop(record, Arc::clone(&flag)));
        // An entry left over from a previous, already-stopped run is
        // replaced here; its loop has exited or is exiting on a false flag.
        tables.running.insert(id, RunningJob { flag, handle });
        info!(id, "job running");
    }

    /// Request that the loop for `id` stop.
    ///
    /// Cooperative: the loop observes the cleared flag at its next iteration
    /// boundary, so the current execution (including its pause) completes
    /// first. A warning no-op if the id is not running.
    pub fn stop_job(&self, id: JobId) {
        let tables = self.lock();
        match tables.running.get(&id) {
            Some(live) if live.flag.load(Ordering::Acquire) => {
                live.flag.store(false, Ordering::Release);
                info!(id, "job stop requested");
            }
            _ => warn!(id, "job is not running"),
        }
    }

    /// Start every registered job that is not already running.
    pub fn run_all(&self) {
        let idle: Vec<JobId> = {
            let tables = self.lock();
            tables
                .jobs
                .keys()
                .copied()
                .filter(|id| !tables.is_running(*id))
                .collect()
        };
        for id in idle {
            self.run_job(id);
        }
    }

    /// Stop every running job.
    pub fn stop_all(&self) {
        let live: Vec<JobId> = {
            let tables = self.lock();
            tables
                .running
                .keys()
                .copied()
                .filter(|id| tables.is_running(*id))
                .collect()
        };
        for id in live {
            self.stop_job(id);
        }
    }

    /// True iff an execution context is currently alive for `id`.
    pub fn is_running(&self, id: JobId) -> bool {
        self.lock().is_running(id)
    }

    /// Block the caller until an external shutdown signal (ctrl-c) arrives.
    ///
    /// Does not stop any job; pair with [`Scheduler::shutdown`] for that.
    pub async fn wait_jobs(&self) -> Result<(), SchedulerError> {
        tokio::signal::ctrl_c().await?;
        info!("shutdown signal received");
        Ok(())
    }

    /// Stop all jobs and wait for every loop to exit.
    pub async fn shutdown(&self) {
        self.stop_all();

        let drained: Vec<(JobId, RunningJob)> = self.lock().running.drain().collect();
        for (id, live) in drained {
            if live.handle.await.is_err() {
                warn!(id, "job loop ended abnormally");
            }
        }
        info!("all job loops exited");
    }
}
