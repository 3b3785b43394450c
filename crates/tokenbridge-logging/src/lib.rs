// ABOUTME: Public API for tokenbridge logging infrastructure using tokio-tracing
// ABOUTME: Provides centralized configuration and initialization for structured logging

pub mod config;
pub mod layers;
pub mod performance;
pub mod subscriber;


// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{FileConfig, LogLevel, LoggingConfig, OutputConfig, Rotation};
pub use performance::PerfTimer;
pub use subscriber::init_subscriber;

use anyhow::Result;

/// Initialize logging with configuration taken from the environment.
///
/// Falls back to `LoggingConfig::default()` overridden by `TOKENBRIDGE_LOG`
/// or `RUST_LOG`.
pub fn init_logging() -> Result<()> {
    let config = LoggingConfig::from_env()?;
    init_subscriber(config)
}

/// Initialize logging with custom configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}
