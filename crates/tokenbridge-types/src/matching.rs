// ABOUTME: Reverse-translation result types produced by the token translator
// ABOUTME: Confidence tiers, match methods and the raw literal wrapper

use serde::{Deserialize, Serialize};
use std::fmt;

/// How certain a reverse-translation result is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Confidence {
    Exact,
    Approximate,
    NoMatch,
}

/// Where a match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// Reverse binding index (identity)
    Binding,
    /// Distance search over token values (heuristic)
    Value,
}

/// Raw literal handed over by the extraction client: `"24px"`, `"#9333EA"`, `24`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Number(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

/// Result of mapping an external binding name or literal back to a canonical token.
///
/// `confidence == NoMatch` always comes with an empty `token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Matched token path (dot notation), empty when nothing matched
    pub token: String,
    pub confidence: Confidence,
    pub match_method: MatchMethod,
    /// Original value as text
    pub raw_value: String,
    /// Distance from the matched token, e.g. `±1px` or `ΔE=2.1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    /// Nearest candidate when nothing matched within tolerance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<String>,
}

impl MatchResult {
    pub fn exact(token: impl Into<String>, method: MatchMethod, raw_value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            confidence: Confidence::Exact,
            match_method: method,
            raw_value: raw_value.into(),
            delta: None,
            suggestion: None,
            primitive: None,
            semantic: None,
        }
    }

    pub fn approximate(
        token: impl Into<String>,
        raw_value: impl Into<String>,
        delta: impl Into<String>,
    ) -> Self {
        Self {
            confidence: Confidence::Approximate,
            delta: Some(delta.into()),
            ..Self::exact(token, MatchMethod::Value, raw_value)
        }
    }

    pub fn no_match(method: MatchMethod, raw_value: impl Into<String>) -> Self {
        Self {
            confidence: Confidence::NoMatch,
            ..Self::exact(String::new(), method, raw_value)
        }
    }

    /// Attach the nearest out-of-tolerance candidate to a no-match result
    pub fn with_suggestion(mut self, suggestion: impl Into<String>, delta: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self.delta = Some(delta.into());
        self
    }

    pub fn is_match(&self) -> bool {
        self.confidence != Confidence::NoMatch
    }
}
