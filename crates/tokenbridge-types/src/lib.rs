// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer shared by the engine and its external collaborators

pub mod category;
pub mod classification;
pub mod matching;
pub mod platform;

// Re-export commonly used types
pub use category::Category;
pub use classification::{
    ClassificationSummary, ClassificationTier, ClassifiedToken, ClosestMatch, UnidentifiedReason,
    UnidentifiedValue,
};
pub use matching::{Confidence, MatchMethod, MatchResult, RawValue};
pub use platform::{ConstraintType, Platform, PlatformScalar, PlatformValue, Severity};
