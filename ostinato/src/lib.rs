//! # Ostinato - Fixed-Period Task Running for Rust
//!
//! This library runs registered units of work on a fixed period, enforcing a
//! per-execution timeout, compensating the pause for however long the
//! execution took, and absorbing failures so one bad task never takes down
//! the process or the other tasks.
//!
//! ## Features
//!
//! - **Fixed periods**: each job targets a constant time between the starts
//!   of consecutive executions
//! - **Drift compensation**: the post-run pause shrinks by the execution
//!   time; an overrunning job restarts immediately, and lost time is never
//!   made up by double-running
//! - **Timeout enforcement**: an execution that exceeds its budget is
//!   abandoned promptly (the work itself is left to finish unobserved)
//! - **Failure isolation**: a panic or timeout is logged and the schedule
//!   continues; other jobs are unaffected
//! - **Config support**: pick the log destination from a TOML/YAML file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::time::Duration;
//!
//! use ostinato::Scheduler;
//!
//! static TICKS: AtomicU64 = AtomicU64::new(0);
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scheduler = Scheduler::new();
//!
//!     // A job is any Fn() + Send + Sync; give it a timeout budget, a
//!     // period, and an id.
//!     scheduler.add_job(
//!         Duration::from_secs(1),
//!         Duration::from_millis(500),
//!         || {
//!             TICKS.fetch_add(1, Ordering::SeqCst);
//!         },
//!         1,
//!     );
//!
//!     scheduler.run_all();
//!
//!     // Block until ctrl-c, then stop the loops and wait for them.
//!     scheduler.wait_jobs().await?;
//!     scheduler.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/application.toml`:
//!
//! ```toml
//! [scheduler]
//! log_file = "runner"
//! logs_dir = "./logs"
//! ```
//!
//! ```rust,no_run
//! use ostinato::SchedulerBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::with_toml("config/application.toml").build()?;
//! # Ok(())
//! # }
//! ```
//!
//! Environment variables with the `OSTINATO_` prefix override file values.

// Re-export core types
pub use ostinato_runtime::{
    load_toml_config, load_yaml_config, ExecutionError, Job, JobId, JobRecord, LogDestination,
    Scheduler, SchedulerBuilder, SchedulerConfig, SchedulerError,
};

// Make the runtime available under its own name as well
pub use ostinato_runtime;
