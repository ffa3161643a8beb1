//! Ostinato Runtime - Core runtime for periodic job execution
//!
//! This crate provides the lifecycle engine for fixed-period jobs:
//! registration, start/stop per id, timeout enforcement, drift-compensated
//! pacing, and per-iteration failure isolation.

mod config;
mod error;
mod executor;
mod logging;
mod looper;
mod scheduler;
mod task;
mod timeout;

// Re-export public API
pub use config::{load_toml_config, load_yaml_config, SchedulerConfig};
pub use error::{ExecutionError, SchedulerError};
pub use logging::LogDestination;
pub use scheduler::{Scheduler, SchedulerBuilder};
pub use task::{Job, JobId, JobRecord};
