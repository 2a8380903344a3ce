//! File-backed tracing setup.
//!
//! Stdout carries the duel text, so every log line goes to a per-session
//! file instead.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const APP_DIR: &str = "spell-duel";
const LOG_FILE: &str = "client.log";

/// Install the global subscriber writing to `<log_dir>/<session_id>/client.log`.
///
/// The returned guard flushes the non-blocking writer when dropped; hold it
/// for the lifetime of the process.
pub fn setup_logging(session_id: &str, log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_directory);

    let session_log_dir = log_dir.join(session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!(
        "Log file: {}",
        session_log_dir.join(LOG_FILE).display()
    );

    Ok(guard)
}

/// Platform cache directory for logs, falling back to the temp dir.
fn default_log_directory() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Caches")
                .join(APP_DIR)
                .join("logs");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join(APP_DIR).join("logs");
        } else if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".cache")
                .join(APP_DIR)
                .join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join(APP_DIR).join("logs");
        }
    }

    std::env::temp_dir().join(APP_DIR).join("logs")
}
