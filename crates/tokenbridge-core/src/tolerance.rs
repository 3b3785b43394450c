// ABOUTME: Forward cross-platform tolerance for checking generated token values
// ABOUTME: Sums base, conversion, platform and category components with an audit trail

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tokenbridge_logging::trace;
use tokenbridge_types::{Category, Platform, PlatformScalar};

use crate::config::ToleranceConfig;

/// Inputs of a tolerance computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceContext {
    pub category: Category,
    pub base_value: f64,
    pub has_unit_conversion: bool,
    pub has_platform_constraints: bool,
    pub platforms: BTreeSet<Platform>,
    pub is_strategic_flexibility: bool,
}

impl ToleranceContext {
    pub fn new(category: Category, base_value: f64) -> Self {
        Self {
            category,
            base_value,
            has_unit_conversion: false,
            has_platform_constraints: false,
            platforms: BTreeSet::new(),
            is_strategic_flexibility: false,
        }
    }

    pub fn with_unit_conversion(mut self) -> Self {
        self.has_unit_conversion = true;
        self
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.has_platform_constraints = true;
        self.platforms.extend(platforms);
        self
    }

    pub fn with_strategic_flexibility(mut self) -> Self {
        self.is_strategic_flexibility = true;
        self
    }
}

/// Additive parts of a tolerance, before the strategic flexibility factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceComponents {
    pub base: f64,
    pub conversion: f64,
    pub platform_constraint: f64,
    pub category_adjustment: f64,
}

impl ToleranceComponents {
    pub fn sum(&self) -> f64 {
        self.base + self.conversion + self.platform_constraint + self.category_adjustment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceResult {
    /// Meaningless when `requires_exact_match` is set
    pub tolerance: f64,
    pub requires_exact_match: bool,
    pub reasoning: String,
    pub components: ToleranceComponents,
}

#[derive(Debug, Clone, Default)]
pub struct ToleranceCalculator {
    config: ToleranceConfig,
}

impl ToleranceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ToleranceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    pub fn compute_tolerance(&self, ctx: &ToleranceContext) -> ToleranceResult {
        if ctx.category.is_categorical() {
            return ToleranceResult {
                tolerance: 0.0,
                requires_exact_match: true,
                reasoning: format!(
                    "Categorical {} values require an exact string match",
                    ctx.category
                ),
                components: ToleranceComponents::default(),
            };
        }

        let cfg = &self.config;
        let mut reasons = vec![format!("Base mathematical tolerance ({})", cfg.base)];
        let mut components = ToleranceComponents {
            base: cfg.base,
            ..Default::default()
        };

        if ctx.has_unit_conversion {
            components.conversion = if ctx.category.is_dimension() {
                cfg.dimension_conversion
            } else {
                cfg.unitless_conversion
            };
            reasons.push(format!(
                "{} conversion precision (+{})",
                ctx.category, components.conversion
            ));
        }

        if ctx.has_platform_constraints && !ctx.platforms.is_empty() {
            let mut platform_sum: f64 = ctx
                .platforms
                .iter()
                .map(|platform| match platform {
                    Platform::Web => cfg.web,
                    Platform::Ios => cfg.ios,
                    Platform::Android => cfg.android,
                })
                .sum();
            let names: Vec<_> = ctx
                .platforms
                .iter()
                .map(|platform| platform.as_str())
                .collect();
            let mut reason = format!("Platform constraints for {}", names.join(", "));
            if ctx.platforms.len() > 2 {
                platform_sum *= cfg.multi_platform_factor;
                reason.push_str(&format!(" scaled ×{} for multi-platform", cfg.multi_platform_factor));
            }
            components.platform_constraint = platform_sum;
            reasons.push(format!("{reason} (+{})", round_for_display(platform_sum)));
        }

        let adjustment = match ctx.category {
            Category::FontSize | Category::Typography => Some((cfg.font_size_adjustment, "REM rounding")),
            Category::LetterSpacing => Some((cfg.letter_spacing_adjustment, "em precision")),
            Category::LineHeight => Some((cfg.line_height_adjustment, "ratio precision")),
            _ => None,
        };
        if let Some((amount, why)) = adjustment {
            components.category_adjustment = amount;
            reasons.push(format!("{} category adjustment for {why} (+{amount})", ctx.category));
        }

        let mut tolerance = components.sum();
        if ctx.is_strategic_flexibility {
            tolerance *= cfg.strategic_flexibility_factor;
            reasons.push(format!(
                "Strategic flexibility token (×{})",
                cfg.strategic_flexibility_factor
            ));
        }

        trace!(category = %ctx.category, tolerance, "Computed tolerance");

        ToleranceResult {
            tolerance,
            requires_exact_match: false,
            reasoning: reasons.join("; "),
            components,
        }
    }

    /// Absolute tolerance widened to a fraction of `base_value` when that is larger
    pub fn compute_relative_tolerance(
        &self,
        base_value: f64,
        ctx: &ToleranceContext,
    ) -> ToleranceResult {
        let mut result = self.compute_tolerance(ctx);
        if result.requires_exact_match {
            return result;
        }

        let relative = base_value.abs() * self.config.relative_factor;
        if relative > result.tolerance {
            result.tolerance = relative;
            result.reasoning.push_str(&format!(
                "; Relative tolerance applied ({} × {} = {})",
                base_value.abs(),
                self.config.relative_factor,
                round_for_display(relative)
            ));
        }
        result
    }

    /// Strict equality for exact-match results, absolute difference otherwise
    pub fn is_within_tolerance(
        &self,
        a: &PlatformScalar,
        b: &PlatformScalar,
        result: &ToleranceResult,
    ) -> bool {
        if result.requires_exact_match {
            return a == b;
        }
        match (a, b) {
            (PlatformScalar::Number(x), PlatformScalar::Number(y)) => {
                (x - y).abs() <= result.tolerance + f64::EPSILON
            }
            (PlatformScalar::Text(x), PlatformScalar::Text(y)) => x == y,
            _ => false,
        }
    }
}

fn round_for_display(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
