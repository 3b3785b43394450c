// ABOUTME: Token tree ingestion into an arena of leaves with path, binding and alias indexes
// ABOUTME: All indexes are built once at construction and never mutated afterwards

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tokenbridge_logging::{PerfTimer, debug, info, warn};
use tokenbridge_types::Category;

use crate::binding::{normalize_binding_name, push_binding_name};
use crate::color_space::{Lab, parse_color, to_lab};
use crate::error::{Result, TokenError};
use crate::value_matcher::parse_dimension;

/// Handle of a leaf in the tree arena.
///
/// Only valid for the `TokenTree` that issued it; handles are never shared
/// between trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(usize);

impl LeafId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Primitive values carry data; semantic values alias exactly one other path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Primitive,
    Semantic {
        target_path: String,
        /// `None` when the aliased path is not a leaf of this tree
        target: Option<LeafId>,
    },
}

/// Design-system metadata read from `$extensions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMetadata {
    pub family: Option<String>,
    pub formula: Option<String>,
    pub deprecated: bool,
    pub strategic_flexibility: bool,
}

#[derive(Debug, Clone)]
pub struct TokenLeaf {
    path: String,
    value: Value,
    value_type: Option<String>,
    description: Option<String>,
    metadata: TokenMetadata,
    kind: TokenKind,
}

impl TokenLeaf {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw `$value` exactly as it appears in the tree
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// `$value` rendered as text: strings verbatim, everything else as JSON
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Declared or inherited `$type`
    pub fn value_type(&self) -> Option<&str> {
        self.value_type.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self.kind, TokenKind::Semantic { .. })
    }
}

/// A leaf value prepared for distance search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexedValue {
    Number(f64),
    Color(Lab),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueEntry {
    pub leaf: LeafId,
    pub value: IndexedValue,
}

/// Immutable, indexed token tree
#[derive(Debug, Clone)]
pub struct TokenTree {
    source: Value,
    leaves: Vec<TokenLeaf>,
    by_path: HashMap<String, LeafId>,
    by_binding: HashMap<String, LeafId>,
    referrers: HashMap<LeafId, Vec<LeafId>>,
    values: HashMap<Category, Vec<ValueEntry>>,
}

const SLOW_INGEST: Duration = Duration::from_millis(250);

/// Value-index category named by a token family
fn family_category(family: &str) -> Option<Category> {
    match family {
        "spacing" | "inset" => Some(Category::Spacing),
        "color" => Some(Category::Color),
        "radius" => Some(Category::Radius),
        "fontSize" => Some(Category::FontSize),
        "fontWeight" => Some(Category::FontWeight),
        "lineHeight" => Some(Category::LineHeight),
        "letterSpacing" => Some(Category::LetterSpacing),
        "borderWidth" => Some(Category::BorderWidth),
        "opacity" => Some(Category::Opacity),
        "sizing" | "icon" | "tapArea" => Some(Category::Sizing),
        _ => None,
    }
}

/// Family first, `$type` second
fn category_for(metadata: &TokenMetadata, value_type: Option<&str>) -> Option<Category> {
    metadata
        .family
        .as_deref()
        .and_then(family_category)
        .or(match value_type {
            Some("color") => Some(Category::Color),
            Some("shadow") => Some(Category::Shadow),
            _ => None,
        })
}

fn alias_target(value: &Value) -> Option<&str> {
    let text = value.as_str()?;
    text.strip_prefix('{')?.strip_suffix('}')
}

fn read_metadata(node: &Map<String, Value>) -> TokenMetadata {
    const FIELDS: [&str; 4] = ["family", "formula", "deprecated", "strategicFlexibility"];

    let namespace = node
        .get("$extensions")
        .and_then(Value::as_object)
        .and_then(|extensions| {
            extensions
                .values()
                .filter_map(Value::as_object)
                .find(|ns| FIELDS.iter().any(|field| ns.contains_key(*field)))
        });

    let mut metadata = TokenMetadata::default();
    if let Some(ns) = namespace {
        metadata.family = ns.get("family").and_then(Value::as_str).map(str::to_string);
        metadata.formula = ns.get("formula").and_then(Value::as_str).map(str::to_string);
        metadata.deprecated = ns.get("deprecated").and_then(Value::as_bool).unwrap_or(false);
        metadata.strategic_flexibility = ns
            .get("strategicFlexibility")
            .and_then(Value::as_bool)
            .unwrap_or(false);
    }
    if node.get("$deprecated").and_then(Value::as_bool) == Some(true) {
        metadata.deprecated = true;
    }
    metadata
}

struct Builder {
    leaves: Vec<TokenLeaf>,
    by_path: HashMap<String, LeafId>,
    by_binding: HashMap<String, LeafId>,
}

impl Builder {
    fn walk(
        &mut self,
        node: &Map<String, Value>,
        parent_path: &str,
        group_path: &str,
        inherited_type: Option<&str>,
    ) {
        for (key, child) in node {
            if key.starts_with('$') {
                continue;
            }
            let Some(child) = child.as_object() else {
                continue;
            };

            let path = if parent_path.is_empty() {
                key.clone()
            } else {
                format!("{parent_path}.{key}")
            };
            let declared_type = child.get("$type").and_then(Value::as_str);
            let value_type = declared_type.or(inherited_type);

            match child.get("$value") {
                Some(value) => self.push_leaf(child, key, path, group_path, value, value_type),
                None => {
                    let next_group = if group_path.is_empty() {
                        key.clone()
                    } else {
                        format!("{group_path}/{key}")
                    };
                    self.walk(child, &path, &next_group, value_type);
                }
            }
        }
    }

    fn push_leaf(
        &mut self,
        node: &Map<String, Value>,
        key: &str,
        path: String,
        group_path: &str,
        value: &Value,
        value_type: Option<&str>,
    ) {
        if self.by_path.contains_key(&path) {
            warn!(path = %path, "Duplicate token path, keeping the first definition");
            return;
        }

        let id = LeafId(self.leaves.len());
        let binding = normalize_binding_name(&push_binding_name(group_path, key));
        if let Some(existing) = self.by_binding.get(&binding) {
            debug!(
                binding = %binding,
                kept = %self.leaves[existing.0].path,
                skipped = %path,
                "Binding name collision"
            );
        } else {
            self.by_binding.insert(binding, id);
        }

        let kind = match alias_target(value) {
            Some(target) => TokenKind::Semantic {
                target_path: target.to_string(),
                target: None,
            },
            None => TokenKind::Primitive,
        };

        self.by_path.insert(path.clone(), id);
        self.leaves.push(TokenLeaf {
            path,
            value: value.clone(),
            value_type: value_type.map(str::to_string),
            description: node
                .get("$description")
                .and_then(Value::as_str)
                .map(str::to_string),
            metadata: read_metadata(node),
            kind,
        });
    }
}

impl TokenTree {
    /// Ingest a token tree. The root must be a JSON object.
    pub fn from_json(source: Value) -> Result<Self> {
        let Some(root) = source.as_object() else {
            return Err(TokenError::invalid_tree(format!(
                "root must be a JSON object, found {}",
                json_kind(&source)
            )));
        };

        let timer = PerfTimer::new("token_tree_ingest").with_warn_threshold(SLOW_INGEST);

        let mut builder = Builder {
            leaves: Vec::new(),
            by_path: HashMap::new(),
            by_binding: HashMap::new(),
        };
        builder.walk(root, "", "", None);

        let Builder {
            mut leaves,
            by_path,
            by_binding,
        } = builder;

        let mut referrers: HashMap<LeafId, Vec<LeafId>> = HashMap::new();
        let mut alias_count = 0usize;
        for (index, leaf) in leaves.iter_mut().enumerate() {
            if let TokenKind::Semantic {
                target_path,
                target,
            } = &mut leaf.kind
            {
                alias_count += 1;
                *target = by_path.get(target_path.as_str()).copied();
                match target {
                    Some(target_id) => referrers.entry(*target_id).or_default().push(LeafId(index)),
                    None => warn!(
                        alias = %leaf.path,
                        missing = %target_path,
                        "Alias target missing from token tree"
                    ),
                }
            }
        }

        let mut values: HashMap<Category, Vec<ValueEntry>> = HashMap::new();
        for (index, leaf) in leaves.iter().enumerate() {
            let Some(category) = category_for(&leaf.metadata, leaf.value_type()) else {
                continue;
            };
            let indexed = match category {
                Category::Shadow => None,
                Category::Color => leaf
                    .value
                    .as_str()
                    .and_then(parse_color)
                    .map(|rgba| IndexedValue::Color(to_lab(rgba))),
                _ => match &leaf.value {
                    Value::Number(n) => n.as_f64().map(IndexedValue::Number),
                    Value::String(s) => parse_dimension(s).map(|(n, _)| IndexedValue::Number(n)),
                    _ => None,
                },
            };
            if let Some(value) = indexed {
                values.entry(category).or_default().push(ValueEntry {
                    leaf: LeafId(index),
                    value,
                });
            }
        }

        timer.record_items(leaves.len());
        info!(
            leaves = leaves.len(),
            aliases = alias_count,
            bindings = by_binding.len(),
            "Token tree indexed"
        );

        Ok(Self {
            source,
            leaves,
            by_path,
            by_binding,
            referrers,
            values,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let source: Value = serde_json::from_str(json)?;
        Self::from_json(source)
    }

    /// The tree as it was ingested
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaves in tree order
    pub fn leaves(&self) -> impl Iterator<Item = (LeafId, &TokenLeaf)> {
        self.leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| (LeafId(index), leaf))
    }

    /// Leaf behind a handle issued by this tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different, larger tree.
    pub fn leaf(&self, id: LeafId) -> &TokenLeaf {
        &self.leaves[id.0]
    }

    pub fn leaf_id(&self, path: &str) -> Option<LeafId> {
        self.by_path.get(path).copied()
    }

    /// Leaf at a dotted path; groups and unknown paths give `None`
    pub fn get(&self, path: &str) -> Option<&TokenLeaf> {
        self.leaf_id(path).map(|id| self.leaf(id))
    }

    /// Leaf registered under a normalized binding name
    pub fn binding_leaf(&self, normalized: &str) -> Option<LeafId> {
        self.by_binding.get(normalized).copied()
    }

    /// Resolved one-hop alias target of a semantic leaf
    pub fn alias_target(&self, id: LeafId) -> Option<LeafId> {
        match &self.leaf(id).kind {
            TokenKind::Semantic { target, .. } => *target,
            TokenKind::Primitive => None,
        }
    }

    /// Semantic leaves aliasing `id`, in tree order
    pub fn referrers(&self, id: LeafId) -> &[LeafId] {
        self.referrers.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Value-search entries of an index category, in tree order
    pub fn value_entries(&self, category: Category) -> &[ValueEntry] {
        self.values.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
