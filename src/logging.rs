use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "travel_guide.log";

/// Console output plus JSON lines in a daily rolling file under `directory`.
///
/// The returned guard flushes the file writer when dropped; hold it for the
/// lifetime of the process.
pub fn init_logging(directory: &Path) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("travel_guide=info".parse()?))
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}

/// Console-only logging for one-shot CLI commands. Output goes to stderr so
/// stdout stays machine-readable.
pub fn init_cli_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("travel_guide=warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
