use anyhow::{Context, Result};
use std::{fs::File, path::Path, sync::Mutex};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::time, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// The terminal is owned by the TUI, so events go to `log_file` when given and
/// are dropped otherwise. A non-empty `RUST_LOG` is used instead of the
/// crate's default level. Call once, before the game starts.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref())?;

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {:?}", path))?;
            tracing_subscriber::Registry::default()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_timer(time::uptime())
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
        None => {
            tracing_subscriber::Registry::default()
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .with(filter)
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
    }

    Ok(())
}

fn crate_default() -> &'static str {
    if cfg!(debug_assertions) {
        "grid_snake=debug"
    } else {
        "grid_snake=info"
    }
}

/// `RUST_LOG`, when set, replaces the crate default entirely.
fn build_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = rust_log
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(crate_default());

    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse(directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}
