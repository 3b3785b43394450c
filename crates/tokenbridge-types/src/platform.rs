// ABOUTME: Platform-specific value representations used by forward consistency checks
// ABOUTME: Platforms, per-platform values and constraint classification enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target platform of a generated token value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Web, Platform::Ios, Platform::Android];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a numeric value or a categorical string (font family names)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformScalar {
    Number(f64),
    Text(String),
}

impl PlatformScalar {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PlatformScalar::Number(n) => Some(*n),
            PlatformScalar::Text(_) => None,
        }
    }
}

impl fmt::Display for PlatformScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformScalar::Number(n) => write!(f, "{n}"),
            PlatformScalar::Text(s) => f.write_str(s),
        }
    }
}

/// A token value as one platform renders it, e.g. `0.5rem`, `44pt`, `48dp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformValue {
    pub value: PlatformScalar,
    pub unit: String,
}

impl PlatformValue {
    pub fn number(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value: PlatformScalar::Number(value),
            unit: unit.into(),
        }
    }

    pub fn text(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: PlatformScalar::Text(value.into()),
            unit: unit.into(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        self.value.as_number()
    }
}

/// How strongly a platform constraint overrides mathematical consistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// Source of a platform-imposed limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintType {
    Accessibility,
    Rendering,
    FontSystem,
    ConversionPrecision,
}
