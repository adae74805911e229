//! Response Schema Descriptor
//!
//! Static description of the exact shape the generation service must return,
//! serialised in the service's `responseSchema` format. The same descriptor
//! drives the local shape validation pass applied to every response, so the
//! contract sent to the service and the contract enforced on its output
//! cannot drift apart.

use crate::error::ConfigurationError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Primitive or container type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Array,
    Object,
}

impl SchemaType {
    fn name(self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            SchemaType::String => value.is_string(),
            SchemaType::Array => value.is_array(),
            SchemaType::Object => value.is_object(),
        }
    }
}

/// Inclusive list-length bounds. Local only; never sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemBounds {
    pub min: usize,
    pub max: Option<usize>,
}

/// Whether list-length hints are enforced during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardinalityPolicy {
    /// Required-field presence and types only.
    #[default]
    Lenient,
    /// Also enforce the item bounds declared on array nodes.
    Strict,
}

/// One node of the response schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<&'static str, SchemaNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<&'static str>,
    #[serde(skip)]
    pub bounds: Option<ItemBounds>,
}

/// First mismatch found between a value and the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for ShapeViolation {}

impl SchemaNode {
    pub fn string(description: &'static str) -> Self {
        Self {
            kind: SchemaType::String,
            description: Some(description),
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
            bounds: None,
        }
    }

    /// Bare string node used as array items.
    pub fn string_item() -> Self {
        Self {
            description: None,
            ..Self::string("")
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            kind: SchemaType::Array,
            description: None,
            properties: BTreeMap::new(),
            items: Some(Box::new(items)),
            required: Vec::new(),
            bounds: None,
        }
    }

    /// Object node; every listed property is required.
    pub fn object(properties: Vec<(&'static str, SchemaNode)>) -> Self {
        let required = properties.iter().map(|(name, _)| *name).collect();
        Self {
            kind: SchemaType::Object,
            description: None,
            properties: properties.into_iter().collect(),
            items: None,
            required,
            bounds: None,
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn bounded(mut self, min: usize, max: Option<usize>) -> Self {
        self.bounds = Some(ItemBounds { min, max });
        self
    }

    /// Structural self-check of the descriptor.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        self.check_at("$")
    }

    fn check_at(&self, path: &str) -> Result<(), ConfigurationError> {
        match self.kind {
            SchemaType::Object => {
                if self.properties.is_empty() {
                    return Err(ConfigurationError::InvalidSchema(format!(
                        "{}: object declares no properties",
                        path
                    )));
                }
                for name in &self.required {
                    if !self.properties.contains_key(name) {
                        return Err(ConfigurationError::InvalidSchema(format!(
                            "{}: required field '{}' is not a declared property",
                            path, name
                        )));
                    }
                }
                for (name, child) in &self.properties {
                    child.check_at(&format!("{}.{}", path, name))?;
                }
            }
            SchemaType::Array => {
                let items = self.items.as_ref().ok_or_else(|| {
                    ConfigurationError::InvalidSchema(format!("{}: array declares no items", path))
                })?;
                if let Some(ItemBounds { min, max: Some(max) }) = self.bounds {
                    if min > max {
                        return Err(ConfigurationError::InvalidSchema(format!(
                            "{}: item bounds {}..={} are empty",
                            path, min, max
                        )));
                    }
                }
                items.check_at(&format!("{}[]", path))?;
            }
            SchemaType::String => {}
        }
        Ok(())
    }

    /// Validate `value` against this node, returning the first mismatch.
    pub fn validate(&self, value: &Value, policy: CardinalityPolicy) -> Result<(), ShapeViolation> {
        self.validate_at(value, policy, "$")
    }

    fn validate_at(
        &self,
        value: &Value,
        policy: CardinalityPolicy,
        path: &str,
    ) -> Result<(), ShapeViolation> {
        if !self.kind.matches(value) {
            return Err(ShapeViolation {
                path: path.to_string(),
                message: format!(
                    "expected {}, found {}",
                    self.kind.name(),
                    json_type_name(value)
                ),
            });
        }

        match (self.kind, value) {
            (SchemaType::Object, Value::Object(fields)) => {
                for name in &self.required {
                    if !fields.contains_key(*name) {
                        return Err(ShapeViolation {
                            path: path.to_string(),
                            message: format!("missing required field '{}'", name),
                        });
                    }
                }
                for (name, child) in &self.properties {
                    if let Some(field) = fields.get(*name) {
                        child.validate_at(field, policy, &format!("{}.{}", path, name))?;
                    }
                }
            }
            (SchemaType::Array, Value::Array(elements)) => {
                if policy == CardinalityPolicy::Strict {
                    if let Some(bounds) = self.bounds {
                        check_bounds(bounds, elements.len(), path)?;
                    }
                }
                if let Some(items) = &self.items {
                    for (index, element) in elements.iter().enumerate() {
                        items.validate_at(element, policy, &format!("{}[{}]", path, index))?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn check_bounds(bounds: ItemBounds, len: usize, path: &str) -> Result<(), ShapeViolation> {
    let too_short = len < bounds.min;
    let too_long = bounds.max.map(|max| len > max).unwrap_or(false);
    if too_short || too_long {
        let expected = match bounds.max {
            Some(max) => format!("between {} and {}", bounds.min, max),
            None => format!("at least {}", bounds.min),
        };
        return Err(ShapeViolation {
            path: path.to_string(),
            message: format!("expected {} items, found {}", expected, len),
        });
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The process-wide plan schema. Built on first access, never mutated.
pub fn plan_schema() -> &'static SchemaNode {
    static SCHEMA: OnceLock<SchemaNode> = OnceLock::new();
    SCHEMA.get_or_init(build_plan_schema)
}

fn build_plan_schema() -> SchemaNode {
    let website_strategy = SchemaNode::object(vec![
        (
            "platformSuggestion",
            SchemaNode::string(
                "Suggested platform to build the website (e.g., Shopify, WordPress, Squarespace).",
            ),
        ),
        (
            "keyFeatures",
            SchemaNode::array(SchemaNode::string_item())
                .describe("List of essential features for the website."),
        ),
        (
            "designConcept",
            SchemaNode::string(
                "A brief on the visual design concept (e.g., minimalist, vibrant, professional).",
            ),
        ),
    ])
    .describe("Recommendations for the business website.");

    let platform_plan = SchemaNode::object(vec![
        (
            "platform",
            SchemaNode::string("Name of the social media platform (e.g., Instagram, LinkedIn)."),
        ),
        (
            "strategy",
            SchemaNode::string("The core strategy for this platform."),
        ),
        (
            "contentIdeas",
            SchemaNode::array(SchemaNode::string_item())
                .describe("A list of 3-4 specific content ideas for this platform."),
        ),
    ]);

    let content_marketing = SchemaNode::object(vec![
        (
            "blogIdeas",
            SchemaNode::array(SchemaNode::string_item())
                .describe("A list of at least 3 blog post titles/ideas.")
                .bounded(3, None),
        ),
        (
            "videoIdeas",
            SchemaNode::array(SchemaNode::string_item())
                .describe("A list of at least 3 video content ideas.")
                .bounded(3, None),
        ),
    ])
    .describe("Content marketing ideas.");

    SchemaNode::object(vec![
        (
            "brandingVoice",
            SchemaNode::string("A short description of the recommended brand voice and tone."),
        ),
        ("websiteStrategy", website_strategy),
        (
            "socialMediaPlan",
            SchemaNode::array(platform_plan)
                .describe("A plan for at least 3 relevant social media platforms.")
                .bounded(3, None),
        ),
        ("contentMarketing", content_marketing),
        (
            "seoKeywords",
            SchemaNode::array(SchemaNode::string_item())
                .describe(
                    "A list of 10-15 relevant SEO keywords, including a mix of short-tail and long-tail keywords.",
                )
                .bounded(10, Some(15)),
        ),
    ])
}
