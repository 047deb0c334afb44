use crate::cli::LogFormatArg;
use anyhow::Context;
use pinhole_gateway::access_log::{AccessLineFormat, ACCESS_LOG_TARGET};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Installs the global subscriber.
///
/// Console output honours `RUST_LOG` (default `info`). When `access_log` is
/// given, access events are also appended to that file, one line each. The
/// returned guard must live until shutdown so buffered lines are flushed.
pub fn init(format: LogFormatArg, access_log: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = match format {
        LogFormatArg::Text => fmt::layer().boxed(),
        LogFormatArg::Json => fmt::layer().json().boxed(),
    };

    let (access_layer, guard) = match access_log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open access log {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .event_format(AccessLineFormat)
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(Targets::new().with_target(ACCESS_LOG_TARGET, Level::INFO));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console.with_filter(env_filter))
        .with(access_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
