// ABOUTME: Engine configuration for matching tolerances, tolerance components and constraints
// ABOUTME: Loads tokenbridge.toml and falls back to built-in defaults for unspecified values

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenbridge_logging::LoggingConfig;
use tokenbridge_types::Category;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub constraints: ConstraintConfig,
    /// Passed to `tokenbridge_logging::init_logging_with_config` by embedding hosts
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reverse-translation tolerance bands, in the unit of the raw value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_spacing_band")]
    pub spacing: f64,
    #[serde(default = "default_unit_band")]
    pub radius: f64,
    /// Applies to typography and fontSize
    #[serde(default = "default_unit_band")]
    pub typography: f64,
    /// Every other numeric category
    #[serde(default = "default_unit_band")]
    pub default_numeric: f64,
    /// Exclusive upper bound on CIE76 ΔE for an approximate color match
    #[serde(default = "default_color_delta_e")]
    pub color_delta_e: f64,
}

fn default_spacing_band() -> f64 {
    2.0
}

fn default_unit_band() -> f64 {
    1.0
}

fn default_color_delta_e() -> f64 {
    3.0
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing_band(),
            radius: default_unit_band(),
            typography: default_unit_band(),
            default_numeric: default_unit_band(),
            color_delta_e: default_color_delta_e(),
        }
    }
}

impl MatchConfig {
    /// Numeric tolerance band for a category
    pub fn band_for(&self, category: Category) -> f64 {
        match category {
            Category::Spacing => self.spacing,
            Category::Radius => self.radius,
            Category::Typography | Category::FontSize => self.typography,
            _ => self.default_numeric,
        }
    }
}

/// Components of the forward cross-platform tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    pub base: f64,
    pub dimension_conversion: f64,
    pub unitless_conversion: f64,
    pub web: f64,
    pub ios: f64,
    pub android: f64,
    /// Applied to the platform component when more than two platforms are combined
    pub multi_platform_factor: f64,
    /// REM rounding for fontSize and typography
    pub font_size_adjustment: f64,
    pub letter_spacing_adjustment: f64,
    pub line_height_adjustment: f64,
    pub strategic_flexibility_factor: f64,
    /// Fraction of the base value used by relative tolerance
    pub relative_factor: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            base: 0.001,
            dimension_conversion: 0.01,
            unitless_conversion: 0.001,
            web: 0.001,
            ios: 0.005,
            android: 0.005,
            multi_platform_factor: 1.5,
            font_size_adjustment: 0.005,
            letter_spacing_adjustment: 0.001,
            line_height_adjustment: 0.0005,
            strategic_flexibility_factor: 1.1,
            relative_factor: 0.001,
        }
    }
}

/// Limits used when applying platform constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    /// Largest relative change of a platform-pair ratio that still counts as proportional
    pub proportionality_bound: f64,
    /// Upper end of the range an adjusted value may take
    pub max_reasonable_value: f64,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            proportionality_bound: 0.05,
            max_reasonable_value: 10_000.0,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(config_str: &str) -> anyhow::Result<Self> {
        let config: EngineConfig =
            toml::from_str(config_str).context("Failed to parse engine configuration")?;
        Ok(config)
    }

    /// Load configuration from a TOML file, using defaults when the file does not exist
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tokenbridge_logging::debug!(
                path = %path.display(),
                "No engine configuration found, using defaults"
            );
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        tokenbridge_logging::info!(path = %path.display(), "Loaded engine configuration");
        Ok(config)
    }
}

/// Example tokenbridge.toml configuration:
/// ```toml
/// [matching]
/// spacing = 2.0
/// color_delta_e = 2.5
///
/// [tolerance]
/// ios = 0.004
///
/// [constraints]
/// proportionality_bound = 0.1
///
/// [logging]
/// level = "debug"
/// module_levels = { tokenbridge_core = "trace" }
/// file = { rotation = "hourly", keep = 24 }
/// ```
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.matching.band_for(Category::Spacing), 2.0);
        assert_eq!(config.matching.band_for(Category::Radius), 1.0);
        assert_eq!(config.matching.band_for(Category::Typography), 1.0);
        assert_eq!(config.matching.band_for(Category::Opacity), 1.0);
        assert_eq!(config.matching.color_delta_e, 3.0);
        assert_eq!(config.constraints.proportionality_bound, 0.05);
        assert_eq!(config.tolerance.base, 0.001);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config_str = r#"
[matching]
color_delta_e = 2.5

[tolerance]
ios = 0.004

[constraints]
proportionality_bound = 0.1
"#;

        let config = EngineConfig::from_toml_str(config_str).unwrap();
        assert_eq!(config.matching.color_delta_e, 2.5);
        assert_eq!(config.matching.spacing, 2.0);
        assert_eq!(config.tolerance.ios, 0.004);
        assert_eq!(config.tolerance.android, 0.005);
        assert_eq!(config.constraints.proportionality_bound, 0.1);
        assert_eq!(config.constraints.max_reasonable_value, 10_000.0);
    }

    #[test]
    fn test_logging_table() {
        let config_str = r#"
[logging]
level = "debug"
module_levels = { tokenbridge_core = "trace" }

[logging.output]
json = true

[logging.file]
rotation = "hourly"
keep = 24
"#;

        let config = EngineConfig::from_toml_str(config_str).unwrap();
        let logging = &config.logging;
        assert_eq!(logging.level.to_string(), "debug");
        assert_eq!(logging.module_levels["tokenbridge_core"].to_string(), "trace");
        assert!(logging.output.json);
        assert!(logging.output.console);
        assert_eq!(logging.file.rotation, tokenbridge_logging::Rotation::Hourly);
        assert_eq!(logging.file.keep, Some(24));
        assert_eq!(logging.file.prefix, "tokenbridge");

        assert!(EngineConfig::from_toml_str("[logging]\nlevel = \"loud\"").is_err());
        assert_eq!(EngineConfig::default().logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = EngineConfig::from_toml_str("[matching]\nspacing = \"wide\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokenbridge.toml");

        let missing = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(missing, EngineConfig::default());

        std::fs::write(&path, "[matching]\nradius = 0.5\n").unwrap();
        let loaded = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.matching.radius, 0.5);
    }
}
