//! Logging and tracing configuration
//!
//! Stdout carries the live test report, so diagnostics go to a log file
//! instead of the terminal.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::paths;

/// Name of the log file inside the log directory
const LOG_FILE: &str = "utw.log";

/// Initialize tracing for a run
///
/// Logs are written to `<data dir>/logs/utw.log` and controlled by the
/// `RUST_LOG` environment variable (default: INFO for this crate, WARN for
/// dependencies). The returned guard flushes the writer when dropped and must
/// be held for the lifetime of the program.
///
/// Falls back to stderr at WARN when no log directory can be created.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("utw=info,warn"));

    if let Some(log_dir) = paths::log_dir() {
        if std::fs::create_dir_all(&log_dir).is_ok() {
            let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_line_number(true),
                )
                .init();

            return Some(guard);
        }
    }

    // Fallback: stderr only, quiet enough not to fight the spinner
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    None
}

/// Get the path to the log file
pub fn log_path() -> Option<std::path::PathBuf> {
    paths::log_dir().map(|d| d.join(LOG_FILE))
}
