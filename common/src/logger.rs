use std::fs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialise the global tracing subscriber.
///
/// Everything goes to a daily-rolling file under `log_dir`; when
/// `log_to_stdout` is set a coloured stdout layer is added as well. The filter
/// comes from `LOG_LEVEL` (env-filter syntax) and falls back to `default_level`.
///
/// Keep the returned guard alive until the process exits, otherwise buffered
/// file output is lost.
pub fn init_logger(
    log_dir: &str,
    log_file: &str,
    default_level: &str,
    log_to_stdout: bool,
) -> WorkerGuard {
    fs::create_dir_all(log_dir).ok();

    let file_appender = rolling::daily(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(default_level));

    let initialised = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init();

    if initialised.is_err() {
        eprintln!("tracing subscriber already initialised; keeping the existing one");
    } else {
        tracing::debug!(log_dir, log_file, "logging initialised");
    }

    guard
}
