//! File logging. The terminal belongs to the UI, so log output goes to
//! `<cache_dir>/miru/miru.log` through a non-blocking writer.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log directory: `<cache_dir>/miru`.
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("miru"))
}

/// Filter from `MIRU_LOG`, then `RUST_LOG`, then `info`.
fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env("MIRU_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the writer guard, which must stay alive until exit so buffered
/// lines get flushed. Returns `None` (logging disabled) when the log
/// directory cannot be prepared or a subscriber is already installed.
pub fn init() -> Option<WorkerGuard> {
    init_in(&log_dir()?)
}

fn init_in(dir: &Path) -> Option<WorkerGuard> {
    let appender = match open_appender(dir) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("miru: logging disabled, cannot write to {}: {e}", dir.display());
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(build_filter())
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "miru starting");
    Some(guard)
}

/// `<dir>/miru.log`, never rotated.
fn open_appender(dir: &Path) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("miru")
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_log_file_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("miru.log")).unwrap();
        assert!(init_in(dir.path()).is_none());
    }

    #[test]
    fn log_dir_that_is_a_file_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("miru");
        fs::write(&blocker, "").unwrap();
        assert!(open_appender(&blocker).is_err());
        assert!(init_in(&blocker).is_none());
    }

    #[test]
    fn appender_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("cache").join("miru");
        open_appender(&nested).unwrap();
        assert!(nested.join("miru.log").is_file());
    }
}
