//! File logging for a play session.
//!
//! The terminal belongs to the game, so logs go to
//! `<log_dir>/<session_id>/client.log` only. `RUST_LOG` refines the filter.
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// The returned guard flushes the background writer when dropped; hold it
/// until the process exits.
pub fn setup_logging(log_dir: &Path, session_id: &str) -> Result<WorkerGuard> {
    let session_dir = log_dir.join(session_id);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("Failed to create log directory {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "client.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    let log_file = session_dir.join("client.log");
    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", log_file.display());

    Ok(guard)
}

/// Identifier for the log directory of a new session, e.g. `session_1763197900`.
pub fn new_session_id() -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{}", timestamp)
}
