//! File logging. The terminal belongs to the TUI, so nothing goes to stdout.
//!
//! Filter directives come from `RHYTHMON_LOG` (default `info`).

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "RHYTHMON_LOG";
pub const LOG_FILE: &str = "rhythmon.log";

/// Returns `None` and leaves logging disabled if the directory cannot be created.
/// The guard must be held until shutdown so buffered lines get flushed.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::info!(log_file = ?log_dir.join(LOG_FILE), "rhythmon logging initialized");
    Some(guard)
}
