// ABOUTME: Nearest-token search for literal values within category tolerance bands
// ABOUTME: Numeric distance for dimensions and CIE76 delta E for colors

use once_cell::sync::Lazy;
use regex::Regex;
use tokenbridge_logging::trace;
use tokenbridge_types::{Category, MatchMethod, MatchResult, RawValue};

use crate::color_space::{Lab, parse_color, to_lab};
use crate::config::MatchConfig;
use crate::tree::{IndexedValue, TokenTree};

static DIMENSION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(-?[0-9.]+)\s*([A-Za-z]+|%)?$").ok());

const EXACT_EPSILON: f64 = 1e-9;
const DEFAULT_UNIT: &str = "px";

/// Parse `24px`, `1.5rem`, `50%` or a bare number into value and optional unit
pub fn parse_dimension(text: &str) -> Option<(f64, Option<String>)> {
    let captures = DIMENSION.as_ref()?.captures(text.trim())?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let unit = captures.get(2).map(|m| m.as_str().to_string());
    Some((value, unit))
}

/// Index a category is searched in. `None` for categories never matched by value.
pub fn search_category(category: Category) -> Option<Category> {
    match category {
        Category::Typography => Some(Category::FontSize),
        Category::TapArea => Some(Category::Sizing),
        Category::Shadow | Category::FontFamily => None,
        other => Some(other),
    }
}

/// Render a distance without float noise: `1`, `0.5`, `2.25`
fn format_amount(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

fn numeric_delta(diff: f64, unit: &str) -> String {
    format!("±{}{unit}", format_amount(diff))
}

fn color_delta(distance: f64) -> String {
    format!("ΔE={distance:.1}")
}

/// Match a literal value against tokens of `category`
pub fn match_by_value(
    tree: &TokenTree,
    config: &MatchConfig,
    raw: &RawValue,
    category: Category,
) -> MatchResult {
    let raw_text = raw.to_string();
    let no_match = || MatchResult::no_match(MatchMethod::Value, raw_text.clone());

    let Some(index) = search_category(category) else {
        return no_match();
    };

    if index == Category::Color {
        let Some(color) = raw.as_text().and_then(parse_color) else {
            return no_match();
        };
        return match_color(tree, config, to_lab(color), raw_text);
    }

    let parsed = match raw {
        RawValue::Number(n) if n.is_finite() => Some((*n, None)),
        RawValue::Number(_) => None,
        RawValue::Text(text) => parse_dimension(text),
    };
    let Some((value, unit)) = parsed else {
        return no_match();
    };
    let unit = unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());

    match_number(tree, config.band_for(category), index, value, &unit, raw_text)
}

fn match_number(
    tree: &TokenTree,
    band: f64,
    index: Category,
    value: f64,
    unit: &str,
    raw_text: String,
) -> MatchResult {
    // (path, token value, distance)
    let mut best: Option<(&str, f64, f64)> = None;

    for entry in tree.value_entries(index) {
        let IndexedValue::Number(candidate) = entry.value else {
            continue;
        };
        let diff = (candidate - value).abs();
        let better = match best {
            None => true,
            Some((_, best_value, best_diff)) => {
                diff < best_diff - EXACT_EPSILON
                    || ((diff - best_diff).abs() <= EXACT_EPSILON && candidate > best_value)
            }
        };
        if better {
            best = Some((tree.leaf(entry.leaf).path(), candidate, diff));
        }
    }

    let Some((path, _, diff)) = best else {
        return MatchResult::no_match(MatchMethod::Value, raw_text);
    };

    trace!(category = %index, nearest = %path, diff, "Nearest numeric token");

    if diff <= EXACT_EPSILON {
        MatchResult::exact(path, MatchMethod::Value, raw_text)
    } else if diff <= band + EXACT_EPSILON {
        MatchResult::approximate(path, raw_text, numeric_delta(diff, unit))
    } else {
        MatchResult::no_match(MatchMethod::Value, raw_text)
            .with_suggestion(path, numeric_delta(diff, unit))
    }
}

fn match_color(
    tree: &TokenTree,
    config: &MatchConfig,
    target: Lab,
    raw_text: String,
) -> MatchResult {
    let mut best: Option<(&str, f64)> = None;

    for entry in tree.value_entries(Category::Color) {
        let IndexedValue::Color(lab) = entry.value else {
            continue;
        };
        let distance = target.delta_e(&lab);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((tree.leaf(entry.leaf).path(), distance));
        }
    }

    let Some((path, distance)) = best else {
        return MatchResult::no_match(MatchMethod::Value, raw_text);
    };

    trace!(nearest = %path, distance, "Nearest color token");

    if distance <= EXACT_EPSILON {
        MatchResult::exact(path, MatchMethod::Value, raw_text)
    } else if distance < config.color_delta_e {
        MatchResult::approximate(path, raw_text, color_delta(distance))
    } else {
        MatchResult::no_match(MatchMethod::Value, raw_text)
            .with_suggestion(path, color_delta(distance))
    }
}
