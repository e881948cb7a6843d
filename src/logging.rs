//! Diagnostic log setup
//!
//! Events go to an append-only file in the data directory. Setting
//! `DAYBOOK_DEBUG` also mirrors debug-level events to stderr.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Keeps the background log writer alive. Dropping it flushes pending lines.
pub struct LogGuard {
    _file: WorkerGuard,
}

pub fn init(settings: &LoggingConfig, data_dir: &Path) -> Result<LogGuard> {
    let log_path = settings.file_path(data_dir);
    let log_dir = log_path.parent().unwrap_or(data_dir);
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_name = log_path
        .file_name()
        .context("Log file path has no file name")?;

    let appender = tracing_appender::rolling::never(log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(file_filter);

    let stderr_layer = std::env::var("DAYBOOK_DEBUG").is_ok().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::new("daybook=debug"))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::debug!("Logging to {}", log_path.display());
    Ok(LogGuard { _file: guard })
}
