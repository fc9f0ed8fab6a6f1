use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr through a non-blocking writer; keep the returned guard
/// alive for as long as logs should be flushed.
pub fn setup_logging(default_level: &str) -> Result<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(SystemTime)
        .with_writer(writer);

    let subscriber = tracing_subscriber::registry().with(filter).with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::debug!("Logging initialized at level {}", default_level);

    Ok(guard)
}
