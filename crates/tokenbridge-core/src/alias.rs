// ABOUTME: Primitive/semantic pairing of resolved match results
// ABOUTME: Uses the one-hop alias graph built at tree ingestion

use tokenbridge_types::MatchResult;

use crate::tree::{TokenKind, TokenTree};

/// Attach primitive and semantic references to a resolved result.
///
/// A semantic token keeps its path and names its target as primitive. A primitive
/// aliased by semantic tokens is promoted to the first referrer in tree order.
/// No-match results and paths that are not leaves pass through unchanged.
pub fn enrich(tree: &TokenTree, mut result: MatchResult) -> MatchResult {
    if !result.is_match() || result.token.is_empty() {
        return result;
    }
    let Some(id) = tree.leaf_id(&result.token) else {
        return result;
    };

    match tree.leaf(id).kind() {
        TokenKind::Semantic { target_path, .. } => {
            result.semantic = Some(result.token.clone());
            result.primitive = Some(target_path.clone());
        }
        TokenKind::Primitive => match tree.referrers(id).first() {
            Some(&semantic) => {
                let semantic_path = tree.leaf(semantic).path().to_string();
                result.primitive = Some(std::mem::replace(&mut result.token, semantic_path.clone()));
                result.semantic = Some(semantic_path);
            }
            None => {
                result.primitive = Some(result.token.clone());
            }
        },
    }

    result
}
