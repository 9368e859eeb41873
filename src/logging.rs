use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "app_directory=info";

/// Initializes logging with both console and JSON file output.
///
/// The returned guard flushes the file writer on drop, so hold it for the
/// lifetime of the process.
pub fn init_logging(dir: &str) -> WorkerGuard {
    let _ = fs::create_dir_all(dir);

    let file_appender = tracing_appender::rolling::daily(dir, "app_directory.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // A global subscriber may already be installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}
