//! Logging configuration using the tracing ecosystem.
//!
//! The library only emits `tracing` events. Applications that want to see
//! them can install a subscriber with one of the helpers here:
//! - [`init`] writes to stderr
//! - [`init_to_file`] writes to a daily rotating file
//!
//! Both honour `RUST_LOG`, e.g. `RUST_LOG=redmine_client=debug`.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "redmine_client=info,warn";

/// File name prefix of rotated log files.
const LOG_FILE_PREFIX: &str = "redmine-client.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a global subscriber printing to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
///
/// # Example
///
/// ```no_run
/// use redmine_client::logging;
///
/// logging::init().expect("Failed to initialize logging");
/// ```
pub fn init() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging to stderr");
    Ok(())
}

/// Install a global subscriber writing to a daily rotating file in `dir`.
///
/// The directory is created if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a global
/// subscriber is already set.
pub fn init_to_file(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "redmine-client logging started");
    tracing::debug!(log_dir = %dir.display(), "Log directory");

    Ok(())
}

/// The platform-specific default log directory, `<data_local_dir>/redmine-client/logs`.
pub fn default_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join("redmine-client").join("logs"))
}
