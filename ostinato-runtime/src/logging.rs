use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::error::SchedulerError;

/// Default directory for file-backed logs.
pub(crate) const DEFAULT_LOGS_DIR: &str = "./logs";

/// Where a scheduler's log lines go. Chosen once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Standard output, with ANSI level coloring.
    Console,
    /// A truncate-and-create file at `<logs_dir>/<name>.log`, plain text.
    File { name: String },
}

impl Default for LogDestination {
    fn default() -> Self {
        LogDestination::Console
    }
}

/// Resolve the file path a named log destination writes to.
pub(crate) fn log_file_path(logs_dir: &Path, name: &str) -> PathBuf {
    logs_dir.join(format!("{name}.log"))
}

/// Install the global tracing subscriber for the chosen destination.
///
/// The subscriber is process-global: when one is already installed (a second
/// scheduler in the same process, or the embedding application's own), the
/// existing one is kept and this call is a no-op. The level filter honors
/// `RUST_LOG` and defaults to `info`.
pub(crate) fn init(dest: &LogDestination, logs_dir: &Path) -> Result<(), SchedulerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match dest {
        LogDestination::Console => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(true)
                .try_init();
        }
        LogDestination::File { name } => {
            std::fs::create_dir_all(logs_dir)?;
            let file = std::fs::File::create(log_file_path(logs_dir, name))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init();
        }
    }

    Ok(())
}
