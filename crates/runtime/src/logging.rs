//! Tracing bootstrap for embedding hosts.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".duonav/logs")
}

/// Install the global subscriber: a daily-rolling file in `~/.duonav/logs`
/// named after `component`, filtered by `RUST_LOG` (default `info`), plus an
/// optional stderr layer. The returned guard flushes the file writer on
/// drop, so keep it alive for the life of the process.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = default_log_dir();
    let _ = std::fs::create_dir_all(&log_dir);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, component));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}

/// Like [`init_logging`], but safe to call from multiple entry points.
/// Only the first call installs the subscriber and yields a guard.
pub fn init_logging_once(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let mut guard = None;
    INITIALIZED.get_or_init(|| {
        guard = Some(init_logging(component, to_stderr));
    });
    guard
}
