//! File logging for runs.
//!
//! Events go through `tracing`; a fmt subscriber writes them as plain lines
//! (`2024-01-01 12:00:00  INFO Job started`) to an append-only file via a
//! non-blocking writer. Keep the returned guard alive until the process is
//! about to exit, or buffered lines are lost.

use std::fs::OpenOptions;
use std::path::Path;

use thiserror::Error;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Timestamp format of log lines.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber writing INFO and above to `path`.
pub fn init_file_logging(path: &Path) -> Result<WorkerGuard, LoggingError> {
    let open_err = |source| LoggingError::Open {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(open_err)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::INFO)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(guard)
}
