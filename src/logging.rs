use std::{fs::OpenOptions, path::Path};

use tracing_appender::non_blocking::WorkerGuard;

use crate::error::AppError;

/// Send `tracing` output to `path` through a non-blocking writer.
///
/// The terminal belongs to the renderer, so nothing is logged to stdout. Keep the returned guard
/// alive for the whole run; dropping it flushes and stops the writer thread.
pub fn init(path: &Path, level: tracing::Level) -> Result<WorkerGuard, AppError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    tracing::info!("[logging] writing {} logs to {}", level, path.display());
    Ok(guard)
}
