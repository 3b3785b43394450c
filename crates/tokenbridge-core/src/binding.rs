// ABOUTME: Binding-name resolution from design-tool variable names to token paths
// ABOUTME: Reproduces the push naming transform so pushed variables resolve by identity

use once_cell::sync::Lazy;
use regex::Regex;
use tokenbridge_logging::debug;
use tokenbridge_types::{MatchMethod, MatchResult};

use crate::tree::TokenTree;

static NAME_AND_NUMBER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)(\d+)$").ok());

/// Replace every `/` with `.`
pub fn normalize_binding_name(name: &str) -> String {
    name.replace('/', ".")
}

/// Strip `group` from the front of `key` when the remainder starts a new word or number,
/// e.g. `("space", "space100")` gives `"100"`
fn strip_group_prefix<'a>(group: &str, key: &'a str) -> &'a str {
    if group.is_empty() || key.len() <= group.len() {
        return key;
    }
    let (head, remainder) = match (key.get(..group.len()), key.get(group.len()..)) {
        (Some(head), Some(remainder)) => (head, remainder),
        _ => return key,
    };
    let starts_word = remainder
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c.is_ascii_uppercase());

    if head.eq_ignore_ascii_case(group) && starts_word {
        remainder
    } else {
        key
    }
}

/// `purple300` gives `("purple", "300")`
fn split_name_and_number(value: &str) -> Option<(&str, &str)> {
    let captures = NAME_AND_NUMBER.as_ref()?.captures(value)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Variable name the push side gives a leaf with `key` under slash-joined `group_path`.
///
/// ```text
/// ("space", "space100")          -> "space/100"
/// ("color/purple", "purple300")  -> "color/purple/purple/300"
/// ("semantic", "color.primary")  -> "color/primary"
/// ```
pub fn push_binding_name(group_path: &str, key: &str) -> String {
    if key.contains('.') {
        return key.replace('.', "/");
    }
    if group_path.is_empty() {
        return key.to_string();
    }

    let base_group = group_path.split('/').next().unwrap_or(group_path);
    let prefix = if group_path.contains('/') {
        group_path
    } else {
        base_group
    };
    let stripped = strip_group_prefix(base_group, key);

    match split_name_and_number(stripped) {
        Some((name, number)) => format!("{prefix}/{name}/{number}"),
        None => format!("{prefix}/{stripped}"),
    }
}

/// Resolve a binding name through the reverse binding index, then as a literal path
pub fn match_by_binding(tree: &TokenTree, name: &str) -> MatchResult {
    let normalized = normalize_binding_name(name);

    let found = tree
        .binding_leaf(&normalized)
        .or_else(|| tree.leaf_id(&normalized));

    match found {
        Some(id) => {
            let leaf = tree.leaf(id);
            MatchResult::exact(leaf.path(), MatchMethod::Binding, leaf.value_text())
        }
        None => {
            debug!(binding = %name, "Binding lookup missed");
            MatchResult::no_match(MatchMethod::Binding, String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_tree;
    use serde_json::json;
    use tokenbridge_types::Confidence;

    #[test]
    fn test_normalize_binding_name() {
        assert_eq!(normalize_binding_name("space/100"), "space.100");
        assert_eq!(
            normalize_binding_name("color/feedback/success/text"),
            "color.feedback.success.text"
        );
        assert_eq!(normalize_binding_name("plain"), "plain");
    }

    #[test]
    fn test_push_binding_name_transforms() {
        assert_eq!(push_binding_name("space", "space100"), "space/100");
        assert_eq!(push_binding_name("color/purple", "purple300"), "color/purple/purple/300");
        assert_eq!(push_binding_name("radius", "radius050"), "radius/050");
        assert_eq!(push_binding_name("fontSize", "fontSize100"), "fontSize/100");
        assert_eq!(push_binding_name("semanticColor", "color.primary"), "color/primary");
        // "spacer" does not start a new word after "space"
        assert_eq!(push_binding_name("space", "spacer"), "space/spacer");
        assert_eq!(push_binding_name("space", "spaceGrouped"), "space/Grouped");
        assert_eq!(push_binding_name("shadow", "container"), "shadow/container");
        assert_eq!(push_binding_name("font", "heading2"), "font/heading/2");
        assert_eq!(push_binding_name("", "root"), "root");
    }

    #[test]
    fn test_strip_group_prefix_is_case_insensitive() {
        assert_eq!(strip_group_prefix("Space", "space100"), "100");
        assert_eq!(strip_group_prefix("space", "space"), "space");
        assert_eq!(strip_group_prefix("space", "spaceinset"), "spaceinset");
    }

    #[test]
    fn test_match_by_binding_pushed_names() {
        let tree = sample_tree();

        let result = match_by_binding(&tree, "space/100");
        assert_eq!(result.token, "space.space100");
        assert_eq!(result.confidence, Confidence::Exact);
        assert_eq!(result.match_method, MatchMethod::Binding);
        assert_eq!(result.raw_value, "8px");

        let result = match_by_binding(&tree, "color/purple/purple/300");
        assert_eq!(result.token, "color.purple.purple300");
        assert_eq!(result.raw_value, "rgba(147, 51, 234, 1)");
    }

    #[test]
    fn test_match_by_binding_literal_path_fallback() {
        let tree = sample_tree();
        let result = match_by_binding(&tree, "space/space300");
        assert_eq!(result.token, "space.space300");
        assert_eq!(result.confidence, Confidence::Exact);
    }

    #[test]
    fn test_match_by_binding_miss() {
        let tree = sample_tree();
        let result = match_by_binding(&tree, "unknown/var");
        assert_eq!(result.confidence, Confidence::NoMatch);
        assert_eq!(result.match_method, MatchMethod::Binding);
        assert_eq!(result.token, "");
        assert_eq!(result.raw_value, "");

        // Groups are not leaves
        assert!(!match_by_binding(&tree, "color/purple").is_match());
    }

    #[test]
    fn test_numeric_leaf_raw_value() {
        let tree = TokenTree::from_json(json!({
            "fontWeight": {
                "fontWeight400": {
                    "$value": 400,
                    "$extensions": { "designerpunk": { "family": "fontWeight" } }
                }
            }
        }))
        .unwrap();

        let result = match_by_binding(&tree, "fontWeight/400");
        assert_eq!(result.token, "fontWeight.fontWeight400");
        assert_eq!(result.raw_value, "400");
    }
}
