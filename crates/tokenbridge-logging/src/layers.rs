// ABOUTME: Output layers for the tokenbridge subscriber stack
// ABOUTME: Console, rolling file and JSON layers plus the level filter built from config

use anyhow::{Context, Result};
use std::fs;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking,
    rolling::{self, RollingFileAppender},
};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    registry::LookupSpan,
};

use crate::config::{FileConfig, LoggingConfig, OutputConfig, Rotation};

pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Human readable console layer, compact unless `pretty_console` is set.
///
/// Returns `None` when console output is disabled or JSON output replaces it.
pub fn console_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.console || config.json {
        return None;
    }

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let layer = if config.pretty_console {
        base.with_span_events(FmtSpan::CLOSE).pretty().boxed()
    } else {
        base.compact().boxed()
    };

    Some(layer)
}

/// JSON lines on stderr, used instead of the console layer when enabled.
pub fn json_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.json {
        return None;
    }

    Some(
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    )
}

/// Rolling file layer writing through a non-blocking appender.
///
/// Rotation period and the number of kept files come from `FileConfig`.
pub fn file_layer<S>(output: &OutputConfig, config: &FileConfig) -> Result<Option<BoxedLayer<S>>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !output.file {
        return Ok(None);
    }

    fs::create_dir_all(&config.directory).with_context(|| {
        format!("Failed to create log directory: {}", config.directory.display())
    })?;

    let mut builder = RollingFileAppender::builder()
        .rotation(appender_rotation(config.rotation))
        .filename_prefix(config.prefix.as_str())
        .filename_suffix("log");
    if let Some(keep) = config.keep {
        builder = builder.max_log_files(keep.max(1));
    }
    let appender = builder
        .build(&config.directory)
        .context("Failed to create rolling log file appender")?;
    let (writer, guard) = non_blocking(appender);

    // The worker must outlive every event; the subscriber is process-global
    std::mem::forget(guard);

    Ok(Some(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    ))
}

fn appender_rotation(rotation: Rotation) -> rolling::Rotation {
    match rotation {
        Rotation::Minutely => rolling::Rotation::MINUTELY,
        Rotation::Hourly => rolling::Rotation::HOURLY,
        Rotation::Daily => rolling::Rotation::DAILY,
        Rotation::Never => rolling::Rotation::NEVER,
    }
}

/// Level filter from the global level plus per-module directives.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.to_string());

    for (module, level) in &config.module_levels {
        let directive = format!("{module}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid filter directive '{directive}'"))?,
        );
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use tempfile::tempdir;
    use tracing::Level;
    use tracing_subscriber::Registry;

    #[test]
    fn test_console_layer_toggles() {
        let config = OutputConfig::default();
        assert!(console_layer::<Registry>(&config).is_some());

        let config = OutputConfig {
            console: false,
            ..Default::default()
        };
        assert!(console_layer::<Registry>(&config).is_none());

        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        assert!(console_layer::<Registry>(&config).is_none());
        assert!(json_layer::<Registry>(&config).is_some());
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let output = OutputConfig {
            file: true,
            ..Default::default()
        };
        let config = FileConfig {
            directory: temp_dir.path().join("nested"),
            prefix: "engine".to_string(),
            rotation: Rotation::Hourly,
            keep: Some(3),
        };

        let layer = file_layer::<Registry>(&output, &config).unwrap();
        assert!(layer.is_some());
        assert!(temp_dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_file_layer_without_rotation_writes_prefix_file() {
        let temp_dir = tempdir().unwrap();
        let output = OutputConfig {
            console: false,
            file: true,
            ..Default::default()
        };
        let config = FileConfig {
            directory: temp_dir.path().to_path_buf(),
            prefix: "engine".to_string(),
            rotation: Rotation::Never,
            keep: None,
        };

        let layer = file_layer::<Registry>(&output, &config).unwrap();
        assert!(layer.is_some());
        assert!(temp_dir.path().join("engine.log").exists());
    }

    #[test]
    fn test_rotation_mapping() {
        assert_eq!(appender_rotation(Rotation::Minutely), rolling::Rotation::MINUTELY);
        assert_eq!(appender_rotation(Rotation::Hourly), rolling::Rotation::HOURLY);
        assert_eq!(appender_rotation(Rotation::Daily), rolling::Rotation::DAILY);
        assert_eq!(appender_rotation(Rotation::Never), rolling::Rotation::NEVER);
    }

    #[test]
    fn test_file_layer_disabled() {
        let output = OutputConfig::default();
        let layer = file_layer::<Registry>(&output, &FileConfig::default()).unwrap();
        assert!(layer.is_none());
    }

    #[test]
    fn test_env_filter_with_modules() {
        let mut config = LoggingConfig {
            level: LogLevel(Level::WARN),
            ..Default::default()
        };
        config
            .module_levels
            .insert("tokenbridge_core".to_string(), LogLevel(Level::TRACE));

        let filter = env_filter(&config).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("warn"), "{rendered}");
        assert!(rendered.contains("tokenbridge_core=trace"), "{rendered}");
    }
}
