// ABOUTME: Reverse translation entry point combining binding lookup, value search and enrichment
// ABOUTME: Bindings are authoritative; value search is the fallback heuristic

use serde_json::Value;
use tokenbridge_logging::debug;
use tokenbridge_types::{Category, MatchMethod, MatchResult, RawValue};

use crate::alias;
use crate::binding;
use crate::config::MatchConfig;
use crate::error::Result;
use crate::tree::{TokenLeaf, TokenTree};
use crate::value_matcher;

/// Maps design-tool bindings and literal values back to canonical tokens.
///
/// Owns its tree and every index derived from it. Immutable after construction,
/// so a single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Translator {
    tree: TokenTree,
    config: MatchConfig,
}

impl Translator {
    pub fn new(tree: TokenTree) -> Self {
        Self::with_config(tree, MatchConfig::default())
    }

    pub fn with_config(tree: TokenTree, config: MatchConfig) -> Self {
        Self { tree, config }
    }

    pub fn from_json(tokens: &Value) -> Result<Self> {
        Ok(Self::new(TokenTree::from_json(tokens.clone())?))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(TokenTree::from_json_str(json)?))
    }

    /// The ingested tree, for downstream consumers such as composite reconstruction
    pub fn tree(&self) -> &TokenTree {
        &self.tree
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Leaf at a dotted path. Groups and unknown paths give `None`.
    pub fn lookup_token(&self, path: &str) -> Option<&TokenLeaf> {
        self.tree.get(path)
    }

    pub fn match_by_binding(&self, name: &str) -> MatchResult {
        binding::match_by_binding(&self.tree, name)
    }

    pub fn match_by_value(&self, raw: &RawValue, category: Category) -> MatchResult {
        value_matcher::match_by_value(&self.tree, &self.config, raw, category)
    }

    pub fn enrich(&self, result: MatchResult) -> MatchResult {
        alias::enrich(&self.tree, result)
    }

    /// Binding first when one is supplied, value search otherwise; matches are enriched.
    ///
    /// A no-match keeps the value search's suggestion and delta and always reports
    /// the value method.
    pub fn translate(
        &self,
        binding: Option<&str>,
        raw: &RawValue,
        category: Category,
    ) -> MatchResult {
        if let Some(name) = binding.filter(|name| !name.is_empty()) {
            let by_binding = self.match_by_binding(name);
            if by_binding.is_match() {
                debug!(binding = %name, token = %by_binding.token, "Resolved by binding");
                return self.enrich(by_binding);
            }
        }

        let by_value = self.match_by_value(raw, category);
        if by_value.is_match() {
            debug!(
                raw_value = %raw,
                category = %category,
                token = %by_value.token,
                confidence = ?by_value.confidence,
                "Resolved by value"
            );
            return self.enrich(by_value);
        }

        debug!(
            raw_value = %raw,
            category = %category,
            suggestion = by_value.suggestion.as_deref().unwrap_or(""),
            "No token match"
        );
        MatchResult {
            match_method: MatchMethod::Value,
            ..by_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_tokens;
    use tokenbridge_types::Confidence;

    #[test]
    fn test_construction_paths() {
        let from_value = Translator::from_json(&sample_tokens()).unwrap();
        let from_str = Translator::from_json_str(&sample_tokens().to_string()).unwrap();
        assert_eq!(from_value.tree().len(), from_str.tree().len());

        assert!(Translator::from_json(&serde_json::json!("tokens")).is_err());
        assert!(Translator::from_json_str("[]").is_err());
    }

    #[test]
    fn test_lookup_token() {
        let translator = Translator::from_json(&sample_tokens()).unwrap();
        assert_eq!(
            translator.lookup_token("space.space300").unwrap().value_text(),
            "24px"
        );
        assert!(translator.lookup_token("space").is_none());
        assert!(translator.lookup_token("space.space999").is_none());
    }

    #[test]
    fn test_empty_binding_is_ignored() {
        let translator = Translator::from_json(&sample_tokens()).unwrap();
        let result = translator.translate(Some(""), &"16px".into(), Category::Spacing);
        assert_eq!(result.match_method, MatchMethod::Value);
        assert_eq!(result.token, "space.space200");
        assert_eq!(result.confidence, Confidence::Exact);
    }
}
