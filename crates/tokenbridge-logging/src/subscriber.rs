// ABOUTME: Global tracing subscriber setup for tokenbridge binaries and tests
// ABOUTME: Stacks the level filter with console, JSON and file layers from the config

use anyhow::{Context, Result};
use tracing_subscriber::{prelude::*, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::layers::{console_layer, env_filter, file_layer, json_layer};

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let filter = env_filter(&config).context("Failed to create environment filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer(&config.output))
        .with(json_layer(&config.output))
        .with(file_layer(&config.output, &config.file)?)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::info!(
        level = %config.level,
        console = config.output.console,
        json = config.output.json,
        file = config.output.file,
        log_dir = %config.file.directory.display(),
        "Logging initialized"
    );

    Ok(())
}
