//! Logging setup.
//!
//! The TUI owns stdout and stderr, so events go to a file. The returned
//! guard flushes the non-blocking writer and must live until exit.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Environment variable consulted when no level is given on the command line.
pub const LOG_ENV: &str = "CV_TERM_LOG";

const LOG_FILENAME: &str = "cv-term.log";

/// Returns the default log file path.
///
/// Linux: ~/.cache/cv-term/cv-term.log
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cv-term")
        .join(LOG_FILENAME)
}

/// Build the filter: explicit level, else `CV_TERM_LOG`, else `info`.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| Error::Logging(e.to_string())),
        None => Ok(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Open `path` for appending without rotation.
///
/// A path that names a directory, or a file that cannot be created, is a
/// logging error rather than a panic.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Logging(format!("{} is not a file path", path.display())))?;
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| Error::Logging(format!("{}: {}", path.display(), e)))
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path, level: Option<&str>) -> Result<WorkerGuard> {
    let filter = build_filter(level)?;
    let appender = file_appender(path)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(guard)
}
