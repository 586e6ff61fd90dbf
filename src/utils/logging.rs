/// Logging setup
///
/// The interactive dashboard owns the terminal, so events only reach stderr
/// when explicitly asked for. Otherwise they go to a log file or nowhere.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where formatted events are written
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

/// Initialize the global subscriber
///
/// `quiet` lowers the default directive to errors only; `RUST_LOG` still wins.
pub fn init_logging(target: LogTarget<'_>, quiet: bool) -> Result<()> {
    let directive = if quiet { "heapdash=error" } else { "heapdash=info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .context("Invalid log filter")?;

    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        LogTarget::Discard => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .try_init(),
    }
    .context("Logging already initialized")?;

    Ok(())
}
