//! Log setup.
//!
//! The TUI owns the terminal, so logs go to a daily-rolling file under
//! ${WIFICTL_HOME}/logs instead of stdout/stderr. Level filtering comes from
//! the WIFICTL_LOG environment variable (`info` by default).

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use wifictl_core::config;

/// Initializes the global tracing subscriber.
///
/// The returned guard flushes buffered log lines on drop; keep it alive for
/// the process lifetime.
pub fn init() -> Result<WorkerGuard> {
    let dir = config::paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "wifictl.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("WIFICTL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
