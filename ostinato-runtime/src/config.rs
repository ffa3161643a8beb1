use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::error::SchedulerError;

/// Scheduler settings read from the `[scheduler]` section of a config file.
///
/// Everything is optional; a missing section means console logging under the
/// default logs directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Name of the log file to write under `logs_dir`. Absent means console.
    pub log_file: Option<String>,
    /// Directory for file-backed logs. Defaults to `./logs`.
    pub logs_dir: Option<PathBuf>,
}

/// Load scheduler config from a specific TOML file.
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<SchedulerConfig, SchedulerError> {
    load(path.as_ref(), FileFormat::Toml)
}

/// Load scheduler config from a specific YAML file.
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<SchedulerConfig, SchedulerError> {
    load(path.as_ref(), FileFormat::Yaml)
}

fn load(path: &Path, format: FileFormat) -> Result<SchedulerConfig, SchedulerError> {
    let config = Config::builder()
        .add_source(File::from(path).format(format))
        .add_source(config::Environment::with_prefix("OSTINATO").separator("_"))
        .build()?;

    match config.get::<SchedulerConfig>("scheduler") {
        Ok(section) => Ok(section),
        Err(ConfigError::NotFound(_)) => Ok(SchedulerConfig::default()),
        Err(err) => Err(err.into()),
    }
}
