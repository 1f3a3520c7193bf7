//! Logging setup for the binary.
//!
//! The terminal belongs to the grid, so events go to `spark-grid.log` under
//! the configured directory through a non-blocking writer. Keep the returned
//! guard alive until exit or buffered lines are lost.

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{GridConfig, DEFAULT_LOG_FILTER};

pub const LOG_FILE_NAME: &str = "spark-grid.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Appender(#[from] InitError),
    #[error("cannot install subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Where the log file for `config` lives.
pub fn log_file_path(config: &GridConfig) -> PathBuf {
    config.log_dir.join(LOG_FILE_NAME)
}

/// Parse the configured filter, falling back to the default directive.
fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber.
pub fn init(config: &GridConfig) -> Result<WorkerGuard, LoggingError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(&config.log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Registry::default()
        .with(build_filter(&config.log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()?;

    Ok(guard)
}
