// ABOUTME: Cross-platform token resolution and consistency engine
// ABOUTME: Reverse translation of design-tool values plus forward tolerance and constraint checks

pub mod alias;
pub mod binding;
pub mod classification;
pub mod color_space;
pub mod config;
pub mod constraints;
pub mod error;
pub mod tolerance;
pub mod translator;
pub mod tree;
pub mod value_matcher;

#[cfg(test)]
mod fixtures;



pub use classification::{classify, to_classified_token, to_unidentified_value};
pub use config::{ConstraintConfig, EngineConfig, MatchConfig, ToleranceConfig};
pub use constraints::{ConstraintApplication, PlatformConstraint, PlatformConstraintHandler};
pub use error::{Result, TokenError};
pub use tolerance::{ToleranceCalculator, ToleranceComponents, ToleranceContext, ToleranceResult};
pub use translator::Translator;
pub use tree::{LeafId, TokenKind, TokenLeaf, TokenMetadata, TokenTree};

// Shared data types, re-exported so collaborators need a single dependency
pub use tokenbridge_types::{
    Category, ClassificationSummary, ClassificationTier, ClassifiedToken, Confidence,
    ConstraintType, MatchMethod, MatchResult, Platform, PlatformScalar, PlatformValue, RawValue,
    Severity, UnidentifiedReason, UnidentifiedValue,
};

/// Reverse-translation, tolerance and constraint components built from one configuration
#[derive(Debug)]
pub struct Engine {
    pub translator: Translator,
    pub tolerance: ToleranceCalculator,
    pub constraints: PlatformConstraintHandler,
}

impl Engine {
    pub fn new(tree: TokenTree, config: EngineConfig) -> Self {
        Self {
            translator: Translator::with_config(tree, config.matching),
            tolerance: ToleranceCalculator::with_config(config.tolerance),
            constraints: PlatformConstraintHandler::with_config(config.constraints),
        }
    }
}
