// ABOUTME: Three-tier classification records for reverse-translated values
// ABOUTME: Semantic, primitive and unidentified buckets consumed by extraction reports

use crate::matching::{Confidence, MatchMethod};
use serde::{Deserialize, Serialize};

/// Classification tier of an enriched match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationTier {
    /// Both semantic and primitive references confirmed
    Semantic,
    /// Primitive reference found, no semantic alias exists
    Primitive,
    /// No token within tolerance
    Unidentified,
}

/// A value that resolved to a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedToken {
    /// Design-tool property the value came from (`padding-top`, `fill`, ...)
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_token: Option<String>,
    pub primitive_token: String,
    pub raw_value: String,
    pub match_method: MatchMethod,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

/// Why a value could not be identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnidentifiedReason {
    UnresolvedBinding,
    OutOfTolerance,
    NoTokenMatch,
}

/// Closest candidate reported for an unidentified value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosestMatch {
    pub token: String,
    pub delta: String,
}

/// A value that did not resolve to any token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnidentifiedValue {
    pub property: String,
    pub raw_value: String,
    pub reason: UnidentifiedReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closest_match: Option<ClosestMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variable_id: Option<String>,
}

/// Aggregate counts across the three tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationSummary {
    pub semantic_identified: usize,
    pub primitive_identified: usize,
    pub unidentified: usize,
}

impl ClassificationSummary {
    pub fn from_tiers(
        semantic: &[ClassifiedToken],
        primitive: &[ClassifiedToken],
        unidentified: &[UnidentifiedValue],
    ) -> Self {
        Self {
            semantic_identified: semantic.len(),
            primitive_identified: primitive.len(),
            unidentified: unidentified.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.semantic_identified + self.primitive_identified + self.unidentified
    }
}
