use std::path::PathBuf;

use tracing::info;

use super::Scheduler;
use crate::config::{load_toml_config, load_yaml_config, SchedulerConfig};
use crate::error::SchedulerError;
use crate::logging::{self, LogDestination, DEFAULT_LOGS_DIR};

/// Builder for the scheduler: chooses the log destination, optionally from a
/// config file.
pub struct SchedulerBuilder {
    destination: LogDestination,
    logs_dir: PathBuf,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerBuilder {
    /// Create a builder with default settings (console logging).
    pub fn new() -> Self {
        Self {
            destination: LogDestination::Console,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
        }
    }

    /// Create from the `[scheduler]` section of a TOML config file.
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early
    /// during setup.
    pub fn with_toml(path: &str) -> Self {
        let config = load_toml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load TOML config from '{}': {}", path, e));
        Self::from_config(config)
    }

    /// Create from the `[scheduler]` section of a YAML config file.
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early
    /// during setup.
    pub fn with_yaml(path: &str) -> Self {
        let config = load_yaml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load YAML config from '{}': {}", path, e));
        Self::from_config(config)
    }

    /// Create from an already-loaded config.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self::from_config(config)
    }

    fn from_config(config: SchedulerConfig) -> Self {
        let mut builder = Self::new();
        if let Some(name) = config.log_file {
            builder.destination = LogDestination::File { name };
        }
        if let Some(dir) = config.logs_dir {
            builder.logs_dir = dir;
        }
        builder
    }

    /// Send log lines to `<logs dir>/<name>.log` instead of the console.
    pub fn log_to_file(mut self, name: impl Into<String>) -> Self {
        self.destination = LogDestination::File { name: name.into() };
        self
    }

    /// Send log lines to the console.
    pub fn log_to_console(mut self) -> Self {
        self.destination = LogDestination::Console;
        self
    }

    /// Override the directory file-backed logs are written under.
    pub fn logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = dir.into();
        self
    }

    /// Install the log destination and build the scheduler.
    ///
    /// Fails only when a file destination cannot be prepared; errors while
    /// running jobs never surface here.
    pub fn build(self) -> Result<Scheduler, SchedulerError> {
        logging::init(&self.destination, &self.logs_dir)?;
        info!(destination = ?self.destination, "scheduler ready");
        Ok(Scheduler::bare())
    }
}
