use thiserror::Error;

/// Ways a single job execution can fail.
///
/// A timeout and a panic inside the job body are distinct kinds: both are
/// absorbed at the loop boundary, but they are reported differently.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The execution exceeded its timeout budget. The underlying work is
    /// left running detached; its eventual outcome is discarded.
    #[error("job execution exceeded its timeout budget")]
    TimedOut,

    /// The job body panicked. The payload text is captured at the blocking
    /// task's boundary.
    #[error("job panicked: {0}")]
    Panicked(String),
}

impl ExecutionError {
    /// Short tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionError::TimedOut => "timeout",
            ExecutionError::Panicked(_) => "panic",
        }
    }
}

/// Errors surfaced while constructing a scheduler.
///
/// Operational misuse at runtime (duplicate run, unknown id, stop of a
/// stopped job) is never an error value. It is logged and ignored.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration file could not be loaded or parsed.
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Log file or logs directory could not be created.
    #[error("failed to prepare log destination: {0}")]
    Io(#[from] std::io::Error),
}
