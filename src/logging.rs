//! File logging for the console.
//!
//! The terminal owns stdout and stderr while the UI runs, so records go to a
//! daily-rotated JSON file only.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Where log files are written when the config leaves `directory` unset.
pub fn log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.directory {
        return dir.clone();
    }

    ProjectDirs::from("com", "rdpwrap", "rdpwrap-console")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// The returned guard flushes buffered records on drop and must be held for
/// the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = log_directory(config);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = non_blocking(daily(&dir, &config.file_name));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .json();

    // A subscriber may already be set (tests); keep the existing one
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
