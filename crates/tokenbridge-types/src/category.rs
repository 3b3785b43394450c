// ABOUTME: Token category tags supplied by callers alongside raw values
// ABOUTME: Closed set that selects matching indexes, tolerances and constraint rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token category. Supplied by the caller, never inferred from a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Spacing,
    Radius,
    /// Typography size; matched against font-size tokens
    Typography,
    FontSize,
    FontWeight,
    FontFamily,
    LineHeight,
    LetterSpacing,
    BorderWidth,
    Opacity,
    Sizing,
    TapArea,
    Color,
    Shadow,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Spacing,
        Category::Radius,
        Category::Typography,
        Category::FontSize,
        Category::FontWeight,
        Category::FontFamily,
        Category::LineHeight,
        Category::LetterSpacing,
        Category::BorderWidth,
        Category::Opacity,
        Category::Sizing,
        Category::TapArea,
        Category::Color,
        Category::Shadow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Spacing => "spacing",
            Category::Radius => "radius",
            Category::Typography => "typography",
            Category::FontSize => "fontSize",
            Category::FontWeight => "fontWeight",
            Category::FontFamily => "fontFamily",
            Category::LineHeight => "lineHeight",
            Category::LetterSpacing => "letterSpacing",
            Category::BorderWidth => "borderWidth",
            Category::Opacity => "opacity",
            Category::Sizing => "sizing",
            Category::TapArea => "tapArea",
            Category::Color => "color",
            Category::Shadow => "shadow",
        }
    }

    /// Values of this category are categorical strings and only compare by equality
    pub fn is_categorical(self) -> bool {
        matches!(self, Category::FontFamily)
    }

    /// Dimension categories carry a unit that platforms convert (px, rem, pt, dp, sp)
    pub fn is_dimension(self) -> bool {
        matches!(
            self,
            Category::Spacing
                | Category::Radius
                | Category::Typography
                | Category::FontSize
                | Category::LetterSpacing
                | Category::BorderWidth
                | Category::Sizing
                | Category::TapArea
        )
    }

    /// Numeric categories without a unit
    pub fn is_unitless(self) -> bool {
        matches!(
            self,
            Category::FontWeight | Category::LineHeight | Category::Opacity
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown token category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("gradient".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_camel_case() {
        let json = serde_json::to_string(&Category::FontSize).unwrap();
        assert_eq!(json, "\"fontSize\"");
        let parsed: Category = serde_json::from_str("\"tapArea\"").unwrap();
        assert_eq!(parsed, Category::TapArea);
    }

    #[test]
    fn test_category_kinds_are_disjoint() {
        for category in Category::ALL {
            let kinds = [
                category.is_categorical(),
                category.is_dimension(),
                category.is_unitless(),
            ];
            assert!(kinds.iter().filter(|k| **k).count() <= 1, "{category}");
        }
        assert!(Category::FontFamily.is_categorical());
        assert!(Category::Spacing.is_dimension());
        assert!(Category::Opacity.is_unitless());
    }
}
