// ABOUTME: Shared token tree fixture for unit and scenario tests
// ABOUTME: Spacing, color with a semantic alias, radius and font size families

use serde_json::{Value, json};

use crate::tree::TokenTree;

pub(crate) fn sample_tokens() -> Value {
    json!({
        "$schema": "https://design-tokens.github.io/community-group/format/",
        "space": {
            "space100": {
                "$value": "8px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "spacing", "formula": "base × 1" } }
            },
            "space200": {
                "$value": "16px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "spacing", "formula": "base × 2" } }
            },
            "space300": {
                "$value": "24px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "spacing", "formula": "base × 3" } }
            },
            "space400": {
                "$value": "32px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "spacing", "formula": "base × 4" } }
            }
        },
        "color": {
            "purple": {
                "purple300": {
                    "$value": "rgba(147, 51, 234, 1)",
                    "$type": "color",
                    "$extensions": { "designerpunk": { "family": "color" } }
                },
                "purple500": {
                    "$value": "rgba(107, 33, 168, 1)",
                    "$type": "color",
                    "$extensions": { "designerpunk": { "family": "color" } }
                }
            },
            "primary": {
                "$value": "{color.purple.purple300}",
                "$type": "color",
                "$extensions": { "designerpunk": { "family": "color" } }
            }
        },
        "radius": {
            "radius100": {
                "$value": "4px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "radius" } }
            },
            "radius200": {
                "$value": "8px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "radius" } }
            }
        },
        "fontSize": {
            "fontSize100": {
                "$value": "12px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "fontSize" } }
            },
            "fontSize200": {
                "$value": "14px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "fontSize" } }
            },
            "fontSize300": {
                "$value": "16px",
                "$type": "dimension",
                "$extensions": { "designerpunk": { "family": "fontSize" } }
            }
        }
    })
}

pub(crate) fn sample_tree() -> TokenTree {
    TokenTree::from_json(sample_tokens()).unwrap()
}
