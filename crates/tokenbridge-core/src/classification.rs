// ABOUTME: Sorts enriched match results into semantic, primitive and unidentified tiers
// ABOUTME: Produces the per-property records extraction reports are built from

use tokenbridge_types::{
    ClassificationTier, ClassifiedToken, ClosestMatch, MatchResult, UnidentifiedReason,
    UnidentifiedValue,
};

/// Tier of an enriched result
pub fn classify(result: &MatchResult) -> ClassificationTier {
    if !result.is_match() {
        ClassificationTier::Unidentified
    } else if result.semantic.is_some() {
        ClassificationTier::Semantic
    } else if result.primitive.is_some() {
        ClassificationTier::Primitive
    } else {
        ClassificationTier::Unidentified
    }
}

/// Record for a result classified as semantic or primitive
pub fn to_classified_token(result: &MatchResult, property: &str) -> ClassifiedToken {
    ClassifiedToken {
        property: property.to_string(),
        semantic_token: result.semantic.clone(),
        primitive_token: result
            .primitive
            .clone()
            .unwrap_or_else(|| result.token.clone()),
        raw_value: result.raw_value.clone(),
        match_method: result.match_method,
        confidence: result.confidence,
        delta: result.delta.clone(),
    }
}

/// Record for an unidentified result. A bound variable id marks an unresolved binding.
pub fn to_unidentified_value(
    result: &MatchResult,
    property: &str,
    bound_variable_id: Option<&str>,
) -> UnidentifiedValue {
    let reason = if bound_variable_id.is_some() {
        UnidentifiedReason::UnresolvedBinding
    } else if result.delta.is_some() {
        UnidentifiedReason::OutOfTolerance
    } else {
        UnidentifiedReason::NoTokenMatch
    };

    UnidentifiedValue {
        property: property.to_string(),
        raw_value: result.raw_value.clone(),
        reason,
        closest_match: result.suggestion.as_ref().map(|token| ClosestMatch {
            token: token.clone(),
            delta: result.delta.clone().unwrap_or_default(),
        }),
        bound_variable_id: bound_variable_id.map(str::to_string),
    }
}
