use std::io;

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::config::{LogFormat, LogSettings, RotationPolicy};

/// Keeps the non-blocking appender worker alive.
///
/// Hold the guard until shutdown; dropping it earlier loses buffered file
/// output.
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Install the global tracing subscriber described by `settings`.
///
/// File output (when `dir` is set) is always JSON with the configured
/// rotation; the stdout layer honors the configured format. The filter is
/// seeded from the configured level and remains overridable through
/// `RUST_LOG`.
pub fn init(settings: &LogSettings) -> Result<LogGuard> {
    let guard = if let Some(ref dir) = settings.dir {
        let appender = match settings.rotation {
            RotationPolicy::Daily => rolling::daily(dir, &settings.file_name),
            RotationPolicy::Hourly => rolling::hourly(dir, &settings.file_name),
            RotationPolicy::Never => rolling::never(dir, &settings.file_name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_filter(build_filter(&settings.level)?);

        let installed = if settings.enable_stdout {
            match settings.format {
                LogFormat::Json => {
                    let stdout_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stdout)
                        .with_target(true)
                        .with_filter(build_filter(&settings.level)?);
                    tracing_subscriber::registry()
                        .with(file_layer)
                        .with(stdout_layer)
                        .try_init()
                }
                LogFormat::Pretty => {
                    let stdout_layer = tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(io::stdout)
                        .with_filter(build_filter(&settings.level)?);
                    tracing_subscriber::registry()
                        .with(file_layer)
                        .with(stdout_layer)
                        .try_init()
                }
            }
        } else {
            tracing_subscriber::registry().with(file_layer).try_init()
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        Some(guard)
    } else {
        let installed = match settings.format {
            LogFormat::Json => {
                let stdout_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stdout)
                    .with_target(true)
                    .with_filter(build_filter(&settings.level)?);
                tracing_subscriber::registry().with(stdout_layer).try_init()
            }
            LogFormat::Pretty => {
                let stdout_layer = tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(io::stdout)
                    .with_filter(build_filter(&settings.level)?);
                tracing_subscriber::registry().with(stdout_layer).try_init()
            }
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        None
    };

    Ok(LogGuard { _guard: guard })
}

/// Build an `EnvFilter` seeded with the configured default level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    let default_level: Level = level
        .parse()
        .map_err(|_| anyhow!("Invalid log level: {level}"))?;

    Ok(EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy())
}
