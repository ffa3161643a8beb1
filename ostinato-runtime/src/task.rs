use std::sync::Arc;
use std::time::Duration;

/// Caller-chosen key naming a job within one scheduler instance.
pub type JobId = u64;

/// A unit of work the scheduler runs periodically.
///
/// Implement this trait on your struct, or register a plain closure; any
/// `Fn() + Send + Sync` is a `Job`.
///
/// The body is executed on a blocking worker thread, so it may block freely.
/// It is opaque to the runtime: once started it is never interrupted, even
/// when it overruns its timeout budget.
///
/// # Example
///
/// ```rust
/// use ostinato_runtime::Job;
///
/// struct Heartbeat {
///     name: String,
/// }
///
/// impl Job for Heartbeat {
///     fn run(&self) {
///         println!("{} is alive", self.name);
///     }
/// }
/// ```
pub trait Job: Send + Sync {
    /// Execute one pass of the work.
    fn run(&self);
}

impl<F> Job for F
where
    F: Fn() + Send + Sync,
{
    fn run(&self) {
        self()
    }
}

/// A registered job together with its schedule parameters.
///
/// Created by `Scheduler::add_job`; replaced only while the id is not
/// running. Durations are unsigned, so a period can never go negative: the
/// smallest representable schedule is a zero period, which runs back to back.
#[derive(Clone)]
pub struct JobRecord {
    pub(crate) id: JobId,
    pub(crate) job: Arc<dyn Job>,
    pub(crate) timeout: Duration,
    pub(crate) period: Duration,
}

impl JobRecord {
    pub(crate) fn new(id: JobId, job: Arc<dyn Job>, timeout: Duration, period: Duration) -> Self {
        Self {
            id,
            job,
            timeout,
            period,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Maximum wall time one execution may take before it is treated as
    /// overrun.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Target time between the starts of consecutive executions.
    pub fn period(&self) -> Duration {
        self.period
    }
}
