// ABOUTME: Logging settings, usable standalone or as the [logging] table of an engine config
// ABOUTME: Levels, per-target directives, output sinks, file rotation and env var overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// Global level; wins over `RUST_LOG`
pub const LEVEL_VAR: &str = "TOKENBRIDGE_LOG";
/// Any value switches to JSON lines
pub const JSON_VAR: &str = "TOKENBRIDGE_LOG_JSON";
/// Any value silences the console sink
pub const NO_CONSOLE_VAR: &str = "TOKENBRIDGE_LOG_NO_CONSOLE";
/// Enables the file sink; a non-empty value is taken as the log directory
pub const FILE_VAR: &str = "TOKENBRIDGE_LOG_FILE";

/// A `tracing::Level` that reads and writes as a lowercase name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(pub Level);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(Level::INFO)
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        let level = match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            other => anyhow::bail!(
                "unknown log level '{other}', expected trace, debug, info, warn or error"
            ),
        };
        Ok(LogLevel(level))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = anyhow::Error;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.as_str().to_ascii_lowercase())
    }
}

/// Everything the subscriber stack needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Per-target overrides, e.g. `tokenbridge_core = "debug"`
    pub module_levels: BTreeMap<String, LogLevel>,
    pub output: OutputConfig,
    pub file: FileConfig,
}

/// Which sinks receive events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub console: bool,
    /// File output is opt-in; the engine is usually embedded in another process
    pub file: bool,
    /// JSON lines replace the human readable console format
    pub json: bool,
    pub pretty_console: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            json: false,
            pretty_console: false,
        }
    }
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Rolling file sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub directory: PathBuf,
    /// Files are named `<prefix>.<date>.log`, or `<prefix>.log` without rotation
    pub prefix: String,
    pub rotation: Rotation,
    /// Rolled files kept on disk; `None` keeps all of them
    pub keep: Option<usize>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            prefix: "tokenbridge".to_string(),
            rotation: Rotation::Daily,
            keep: Some(7),
        }
    }
}

/// `<config dir>/tokenbridge`, or the working directory when there is none
fn default_log_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("tokenbridge"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl LoggingConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| env::var(key).ok())
    }

    /// Apply `TOKENBRIDGE_LOG*` and `RUST_LOG` values returned by `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (lookup(LEVEL_VAR), lookup("RUST_LOG")) {
            (Some(level), _) => {
                self.level = level
                    .parse()
                    .with_context(|| format!("Invalid {LEVEL_VAR} value"))?;
            }
            (None, Some(directives)) => self.apply_directives(&directives)?,
            (None, None) => {}
        }

        if lookup(JSON_VAR).is_some() {
            self.output.json = true;
        }
        if lookup(NO_CONSOLE_VAR).is_some() {
            self.output.console = false;
        }
        if let Some(directory) = lookup(FILE_VAR) {
            self.output.file = true;
            if !directory.trim().is_empty() {
                self.file.directory = PathBuf::from(directory);
            }
        }

        Ok(self)
    }

    /// Apply `RUST_LOG`-style directives: a bare level sets the global level,
    /// `target=level` adds a per-target override
    pub fn apply_directives(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    let level = level
                        .parse()
                        .with_context(|| format!("Invalid level in directive '{directive}'"))?;
                    self.module_levels.insert(target.trim().to_string(), level);
                }
                None => {
                    self.level = directive
                        .parse()
                        .with_context(|| format!("Invalid level directive '{directive}'"))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel(Level::INFO));
        assert!(config.output.console);
        assert!(!config.output.file);
        assert_eq!(config.file.rotation, Rotation::Daily);
        assert_eq!(config.file.keep, Some(7));
        assert_eq!(config.file.directory, default_log_dir());
        assert_eq!(config.file.prefix, "tokenbridge");
    }

    #[test]
    fn test_level_names() {
        assert_eq!("TRACE".parse::<LogLevel>().unwrap(), LogLevel(Level::TRACE));
        assert_eq!(" Warning ".parse::<LogLevel>().unwrap(), LogLevel(Level::WARN));
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel(Level::ERROR).to_string(), "error");
    }

    #[test]
    fn test_level_var_wins_over_rust_log() {
        let config = LoggingConfig::default()
            .with_env_overrides(env_of(&[
                ("TOKENBRIDGE_LOG", "debug"),
                ("RUST_LOG", "error,tokenbridge_core=trace"),
            ]))
            .unwrap();
        assert_eq!(config.level, LogLevel(Level::DEBUG));
        assert!(config.module_levels.is_empty());
    }

    #[test]
    fn test_rust_log_directives() {
        let config = LoggingConfig::default()
            .with_env_overrides(env_of(&[(
                "RUST_LOG",
                "warn, tokenbridge_core=debug,tokenbridge_logging=trace",
            )]))
            .unwrap();
        assert_eq!(config.level, LogLevel(Level::WARN));
        assert_eq!(
            config.module_levels.get("tokenbridge_core"),
            Some(&LogLevel(Level::DEBUG))
        );
        assert_eq!(
            config.module_levels.get("tokenbridge_logging"),
            Some(&LogLevel(Level::TRACE))
        );

        let error = LoggingConfig::default()
            .with_env_overrides(env_of(&[("RUST_LOG", "tokenbridge_core=loud")]))
            .unwrap_err();
        assert!(format!("{error:#}").contains("tokenbridge_core=loud"));
    }

    #[test]
    fn test_output_switches() {
        let config = LoggingConfig::default()
            .with_env_overrides(env_of(&[
                ("TOKENBRIDGE_LOG_JSON", "1"),
                ("TOKENBRIDGE_LOG_NO_CONSOLE", "1"),
                ("TOKENBRIDGE_LOG_FILE", "/var/log/tokenbridge"),
            ]))
            .unwrap();
        assert!(config.output.json);
        assert!(!config.output.console);
        assert!(config.output.file);
        assert_eq!(config.file.directory, PathBuf::from("/var/log/tokenbridge"));

        let default_dir = LoggingConfig::default()
            .with_env_overrides(env_of(&[("TOKENBRIDGE_LOG_FILE", "")]))
            .unwrap();
        assert!(default_dir.output.file);
        assert_eq!(default_dir.file.directory, default_log_dir());
    }

    #[test]
    fn test_serde_reads_partial_tables() {
        let config: LoggingConfig = serde_json::from_value(serde_json::json!({
            "level": "debug",
            "module_levels": { "tokenbridge_core": "trace" },
            "file": { "rotation": "hourly", "keep": null }
        }))
        .unwrap();

        assert_eq!(config.level, LogLevel(Level::DEBUG));
        assert_eq!(config.file.rotation, Rotation::Hourly);
        assert_eq!(config.file.keep, None);
        assert_eq!(config.file.prefix, "tokenbridge");
        assert_eq!(config.output, OutputConfig::default());

        let rendered = serde_json::to_value(&config).unwrap();
        assert_eq!(rendered["level"], "debug");
        assert_eq!(rendered["file"]["rotation"], "hourly");

        let invalid = serde_json::json!({ "level": "chatty" });
        assert!(serde_json::from_value::<LoggingConfig>(invalid).is_err());
    }
}
