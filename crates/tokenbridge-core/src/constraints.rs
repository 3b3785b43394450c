// ABOUTME: Platform-imposed floors, ceilings and precision limits for generated values
// ABOUTME: Applies them and checks that cross-platform ratios stay proportional

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokenbridge_logging::{debug, warn};
use tokenbridge_types::{Category, ConstraintType, Platform, PlatformValue, Severity};

use crate::config::ConstraintConfig;

/// A limit one platform imposes on one value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConstraint {
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub platform: Platform,
    pub category: Category,
    pub description: String,
    pub original_value: f64,
    pub constrained_value: f64,
    pub impact: String,
    pub recommendation: String,
    pub severity: Severity,
}

/// Outcome of applying every constraint to a set of per-platform values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintApplication {
    pub adjusted_values: BTreeMap<Platform, PlatformValue>,
    pub constraints: Vec<PlatformConstraint>,
    pub proportionality_preserved: bool,
    pub strategy: String,
    pub consistency_assessment: String,
}

/// What a rule found wrong with a value
struct Violation {
    constraint_type: ConstraintType,
    severity: Severity,
    constrained: f64,
    description: &'static str,
    impact: &'static str,
    recommendation: &'static str,
}

type Rule = fn(value: f64, unit: &str) -> Option<Violation>;

struct ConstraintDefinition {
    platform: Platform,
    category: Category,
    rule: Rule,
    documentation: &'static str,
}

const WEB_MIN_FONT_REM: f64 = 0.5;
const WEB_MIN_FONT_PX: f64 = 8.0;
const WEB_DECIMAL_PLACES: i32 = 3;
const IOS_MIN_TAP_PT: f64 = 44.0;
const ANDROID_MIN_TAP_DP: f64 = 48.0;
const FONT_WEIGHT_MIN: f64 = 100.0;
const FONT_WEIGHT_MAX: f64 = 900.0;

fn web_font_floor(value: f64, unit: &str) -> Option<Violation> {
    let floor = match unit {
        "rem" | "em" => WEB_MIN_FONT_REM,
        "px" => WEB_MIN_FONT_PX,
        _ => return None,
    };
    (value < floor).then_some(Violation {
        constraint_type: ConstraintType::Rendering,
        severity: Severity::Medium,
        constrained: floor,
        description: "Web browsers may not render fonts smaller than 0.5rem (8px) legibly",
        impact: "Text below the browser minimum is clamped or unreadable",
        recommendation: "Raise the font size to at least 0.5rem",
    })
}

fn web_precision(value: f64, unit: &str) -> Option<Violation> {
    if !matches!(unit, "px" | "rem" | "em") {
        return None;
    }
    let scale = 10f64.powi(WEB_DECIMAL_PLACES);
    let rounded = (value * scale).round() / scale;
    ((rounded - value).abs() > 1e-12).then_some(Violation {
        constraint_type: ConstraintType::ConversionPrecision,
        severity: Severity::Low,
        constrained: rounded,
        description: "CSS values beyond three decimal places are rounded by browsers",
        impact: "Sub-pixel differences between the definition and the rendered value",
        recommendation: "Round generated CSS values to three decimal places",
    })
}

fn ios_tap_area(value: f64, _unit: &str) -> Option<Violation> {
    (value < IOS_MIN_TAP_PT).then_some(Violation {
        constraint_type: ConstraintType::Accessibility,
        severity: Severity::High,
        constrained: IOS_MIN_TAP_PT,
        description: "iOS Human Interface Guidelines require touch targets of at least 44pt",
        impact: "Controls smaller than 44pt are hard to hit and fail accessibility review",
        recommendation: "Use a tap area of at least 44pt on iOS",
    })
}

fn android_tap_area(value: f64, _unit: &str) -> Option<Violation> {
    (value < ANDROID_MIN_TAP_DP).then_some(Violation {
        constraint_type: ConstraintType::Accessibility,
        severity: Severity::High,
        constrained: ANDROID_MIN_TAP_DP,
        description: "Material Design requires touch targets of at least 48dp",
        impact: "Controls smaller than 48dp are hard to hit and fail accessibility review",
        recommendation: "Use a tap area of at least 48dp on Android",
    })
}

fn font_weight_range(value: f64, _unit: &str) -> Option<Violation> {
    let clamped = value.clamp(FONT_WEIGHT_MIN, FONT_WEIGHT_MAX);
    (clamped != value).then_some(Violation {
        constraint_type: ConstraintType::FontSystem,
        severity: Severity::Low,
        constrained: clamped,
        description: "Platform font systems only support weights from 100 to 900",
        impact: "Out-of-range weights snap to the nearest supported weight",
        recommendation: "Keep font weights within 100-900",
    })
}

fn default_definitions() -> Vec<ConstraintDefinition> {
    let mut definitions = vec![
        ConstraintDefinition {
            platform: Platform::Web,
            category: Category::FontSize,
            rule: web_font_floor,
            documentation: "Minimum 0.5rem (8px) for reliable rendering",
        },
        ConstraintDefinition {
            platform: Platform::Web,
            category: Category::FontSize,
            rule: web_precision,
            documentation: "Values rounded to 3 decimal places",
        },
        ConstraintDefinition {
            platform: Platform::Ios,
            category: Category::TapArea,
            rule: ios_tap_area,
            documentation: "Minimum touch target 44pt (Human Interface Guidelines)",
        },
        ConstraintDefinition {
            platform: Platform::Android,
            category: Category::TapArea,
            rule: android_tap_area,
            documentation: "Minimum touch target 48dp (Material Design)",
        },
    ];

    definitions.extend(Platform::ALL.into_iter().map(|platform| ConstraintDefinition {
        platform,
        category: Category::FontWeight,
        rule: font_weight_range,
        documentation: "Font weights limited to the 100-900 range",
    }));

    definitions
}

fn format_value(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    format!("{rounded}")
}

/// Registered platform rules. Definitions are fixed at construction.
pub struct PlatformConstraintHandler {
    definitions: Vec<ConstraintDefinition>,
    config: ConstraintConfig,
}

impl Default for PlatformConstraintHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlatformConstraintHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConstraintHandler")
            .field("definitions", &self.definitions.len())
            .field("config", &self.config)
            .finish()
    }
}

impl PlatformConstraintHandler {
    pub fn new() -> Self {
        Self::with_config(ConstraintConfig::default())
    }

    pub fn with_config(config: ConstraintConfig) -> Self {
        Self {
            definitions: default_definitions(),
            config,
        }
    }

    /// Violations per platform with the value each rule leaves behind.
    ///
    /// Rules for the same platform and category run in registration order, each on
    /// the value the previous one produced.
    fn evaluate(
        &self,
        category: Category,
        values: &BTreeMap<Platform, PlatformValue>,
    ) -> Vec<(PlatformConstraint, f64)> {
        let mut found = Vec::new();

        for (platform, platform_value) in values {
            let Some(original) = platform_value.as_number() else {
                continue;
            };
            let mut current = original;

            for definition in self
                .definitions
                .iter()
                .filter(|d| d.platform == *platform && d.category == category)
            {
                let Some(violation) = (definition.rule)(current, &platform_value.unit) else {
                    continue;
                };
                found.push((
                    PlatformConstraint {
                        constraint_type: violation.constraint_type,
                        platform: *platform,
                        category,
                        description: violation.description.to_string(),
                        original_value: current,
                        constrained_value: violation.constrained,
                        impact: violation.impact.to_string(),
                        recommendation: violation.recommendation.to_string(),
                        severity: violation.severity,
                    },
                    violation.constrained,
                ));
                current = violation.constrained;
            }
        }

        found
    }

    /// Constraints violated by `values`. Text values are never constrained.
    pub fn identify_constraints(
        &self,
        category: Category,
        values: &BTreeMap<Platform, PlatformValue>,
    ) -> Vec<PlatformConstraint> {
        self.evaluate(category, values)
            .into_iter()
            .map(|(constraint, _)| constraint)
            .collect()
    }

    /// Clamp constrained platforms and check that every platform-pair ratio survives
    pub fn apply_constraints(
        &self,
        category: Category,
        values: &BTreeMap<Platform, PlatformValue>,
    ) -> ConstraintApplication {
        let evaluated = self.evaluate(category, values);

        if evaluated.is_empty() {
            return ConstraintApplication {
                adjusted_values: values.clone(),
                constraints: Vec::new(),
                proportionality_preserved: true,
                strategy: "No constraints identified; original values preserved".to_string(),
                consistency_assessment: "Mathematical consistency preserved across all platforms"
                    .to_string(),
            };
        }

        let mut adjusted_values = values.clone();
        let mut constraints = Vec::with_capacity(evaluated.len());
        for (constraint, constrained) in evaluated {
            if let Some(value) = adjusted_values.get_mut(&constraint.platform) {
                *value = PlatformValue::number(constrained, value.unit.clone());
            }
            debug!(
                platform = %constraint.platform,
                category = %category,
                severity = %constraint.severity,
                original = constraint.original_value,
                constrained = constraint.constrained_value,
                "Applied platform constraint"
            );
            constraints.push(constraint);
        }

        let proportionality_preserved = self.proportionality_preserved(values, &adjusted_values);
        if !proportionality_preserved {
            warn!(
                category = %category,
                bound = self.config.proportionality_bound,
                "Platform constraints broke cross-platform proportionality"
            );
        }

        let strategy = constraints
            .iter()
            .map(|c| {
                format!(
                    "{}: {} ({} → {})",
                    c.platform,
                    c.description,
                    format_value(c.original_value),
                    format_value(c.constrained_value)
                )
            })
            .collect::<Vec<_>>()
            .join("; ");

        let consistency_assessment =
            self.assess(&constraints, proportionality_preserved);

        ConstraintApplication {
            adjusted_values,
            constraints,
            proportionality_preserved,
            strategy,
            consistency_assessment,
        }
    }

    fn proportionality_preserved(
        &self,
        before: &BTreeMap<Platform, PlatformValue>,
        after: &BTreeMap<Platform, PlatformValue>,
    ) -> bool {
        let numeric: Vec<(f64, f64)> = before
            .iter()
            .filter_map(|(platform, value)| {
                Some((value.as_number()?, after.get(platform)?.as_number()?))
            })
            .collect();

        numeric
            .iter()
            .enumerate()
            .all(|(i, &a)| numeric[i + 1..].iter().all(|&b| self.ratio_preserved(a, b)))
    }

    /// Whether `a:b` moved by at most the proportionality bound.
    ///
    /// Compared cross-multiplied so zero values need no division; a value leaving
    /// or reaching zero always breaks the ratio.
    fn ratio_preserved(
        &self,
        (a_before, a_after): (f64, f64),
        (b_before, b_after): (f64, f64),
    ) -> bool {
        let crosses_zero = |before: f64, after: f64| (before == 0.0) != (after == 0.0);
        if crosses_zero(a_before, a_after) || crosses_zero(b_before, b_after) {
            return false;
        }
        let drift = (a_after * b_before - a_before * b_after).abs();
        drift <= self.config.proportionality_bound * (a_before * b_after).abs()
    }

    fn assess(&self, constraints: &[PlatformConstraint], proportional: bool) -> String {
        let headline = match constraints.iter().map(|c| c.severity).max() {
            Some(Severity::High) => "High-severity constraints applied: Platform requirements enforced",
            Some(Severity::Medium) => {
                "Medium-severity constraints applied: Platform optimization applied"
            }
            Some(Severity::Low) => "Low-severity constraints applied: Minor precision adjustments",
            None => return "Mathematical consistency preserved across all platforms".to_string(),
        };
        let bound = format_value(self.config.proportionality_bound * 100.0);
        if proportional {
            format!("{headline}; proportional relationships maintained within {bound}%")
        } else {
            format!("{headline}; proportional relationships changed by more than {bound}%")
        }
    }

    /// Every high-severity constraint reached its platform and every value is in range
    pub fn validate_application(&self, application: &ConstraintApplication) -> bool {
        let enforced = application
            .constraints
            .iter()
            .filter(|c| c.severity == Severity::High)
            .all(|c| {
                application
                    .adjusted_values
                    .get(&c.platform)
                    .and_then(PlatformValue::as_number)
                    .is_some_and(|value| (value - c.constrained_value).abs() < 1e-9)
            });

        let in_range = application
            .adjusted_values
            .values()
            .filter_map(PlatformValue::as_number)
            .all(|value| (0.0..=self.config.max_reasonable_value).contains(&value));

        enforced && in_range
    }

    /// Human-readable summary of the registered rules per platform and category
    pub fn documentation(&self) -> BTreeMap<Platform, BTreeMap<Category, String>> {
        let mut docs: BTreeMap<Platform, BTreeMap<Category, String>> = BTreeMap::new();
        for definition in &self.definitions {
            docs.entry(definition.platform)
                .or_default()
                .entry(definition.category)
                .and_modify(|text| {
                    text.push_str("; ");
                    text.push_str(definition.documentation);
                })
                .or_insert_with(|| definition.documentation.to_string());
        }
        docs
    }
}
