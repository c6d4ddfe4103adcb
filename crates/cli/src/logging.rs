//! Console and daily log file setup

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file prefix; the appender adds `.yyyy-mm-dd`
pub const LOG_FILE_PREFIX: &str = "bakrot.log";

/// Keeps the file writer alive; drop it last so buffered lines are flushed
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Default filter directive when `RUST_LOG` is unset
pub fn default_directive(debug_mode: bool) -> &'static str {
    if debug_mode {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber
///
/// Lines go to stderr and to `<log_dir>/bakrot.log.<date>`, rotated daily.
/// A log directory that cannot be created leaves console logging only.
pub fn init(log_dir: &Path, debug_mode: bool) -> Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_mode)));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Err(err) = std::fs::create_dir_all(log_dir) {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
            .context("Failed to install log subscriber")?;

        warn!(
            "Cannot create log directory {} ({}); logging to console only",
            log_dir.display(),
            err
        );
        return Ok(LogGuard { _file: None });
    }

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LogGuard {
        _file: Some(guard),
    })
}
