//! Diagnostics go to stderr so command output on stdout stays clean.
use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const APP_TARGET: &str = "etfalloc";

/// Debug output for this crate only, and only with `--verbose`.
fn app_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target(APP_TARGET, level)
}

/// `RUST_LOG` wins over the verbose flag when it parses.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "off" }))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_targets(verbose))
        .with(env_filter(verbose))
        .try_init()?;
    Ok(())
}
