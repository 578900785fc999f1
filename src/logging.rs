use std::env;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/dirtools.log";

/// Filter used when `TRACING_LEVEL` is unset: each `-v` lowers it one step.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Splits `LOG_FILE_PATH` into the directory and file name the appender wants.
fn split_log_path(path: &Path) -> (&Path, &Path) {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file = path.file_name().map_or(path, Path::new);
    (dir, file)
}

/// Installs a stderr layer for the operator and a non-blocking file layer.
/// Results go to stdout, so they stay pipeable. Keep the guard alive until exit.
pub fn init_logger(verbose: u8) -> impl Drop {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| default_level(verbose).to_string());
    let filter_layer = EnvFilter::new(filter);

    let log_file_path = env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let (log_dir, log_file) = split_log_path(Path::new(&log_file_path));

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    debug!("Logging to stderr and {}", log_file_path);

    guard
}
