// ABOUTME: Error types for token tree ingestion
// ABOUTME: Malformed trees fail at construction; malformed values never error

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token tree: {reason}")]
    InvalidTree { reason: String },

    #[error("Failed to parse token tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TokenError {
    /// Create an invalid tree error
    pub fn invalid_tree<S: Into<String>>(reason: S) -> Self {
        Self::InvalidTree {
            reason: reason.into(),
        }
    }
}
