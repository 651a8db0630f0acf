// Declared output schema: sent to the provider as `responseSchema` and used
// locally to check whatever comes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    fn name(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            SchemaType::String => value.is_string(),
            SchemaType::Number => value.is_number(),
            SchemaType::Integer => value.is_i64() || value.is_u64(),
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Array => value.is_array(),
            SchemaType::Object => value.is_object(),
        }
    }
}

/// Subset of the Gemini/OpenAPI schema object that card generation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
    #[serde(rename = "propertyOrdering", skip_serializing_if = "Vec::is_empty", default)]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items: Option<Box<Schema>>,
    /// Local-only rule: strings must contain something other than whitespace.
    #[serde(skip)]
    pub non_empty: bool,
}

/// One place where a value disagrees with its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl Schema {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            property_ordering: Vec::new(),
            items: None,
            non_empty: false,
        }
    }

    pub fn string(description: &str) -> Self {
        Self::new(SchemaType::String).describe(description)
    }

    pub fn array(description: &str, items: Schema) -> Self {
        let mut schema = Self::new(SchemaType::Array).describe(description);
        schema.items = Some(Box::new(items));
        schema
    }

    /// Object schema; properties keep the order they are given in.
    pub fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Self {
        let mut schema = Self::new(SchemaType::Object);
        for (name, property) in properties {
            schema.property_ordering.push(name.to_string());
            schema.properties.insert(name.to_string(), property);
        }
        schema.required = required.iter().map(|name| name.to_string()).collect();
        schema
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Check `value` against this schema, collecting every violation.
    /// Properties not declared in the schema are ignored.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<SchemaViolation>> {
        let mut violations = Vec::new();
        self.check(value, "$", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    fn check(&self, value: &Value, path: &str, violations: &mut Vec<SchemaViolation>) {
        if !self.schema_type.matches(value) {
            violations.push(SchemaViolation {
                path: path.to_string(),
                message: format!(
                    "expected {}, found {}",
                    self.schema_type.name(),
                    json_type_name(value)
                ),
            });
            return;
        }

        match value {
            Value::String(text) if self.non_empty && text.trim().is_empty() => {
                violations.push(SchemaViolation {
                    path: path.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            Value::Array(elements) => {
                if let Some(ref items) = self.items {
                    for (index, element) in elements.iter().enumerate() {
                        items.check(element, &format!("{}[{}]", path, index), violations);
                    }
                }
            }
            Value::Object(fields) => {
                for name in &self.required {
                    if !fields.contains_key(name) {
                        violations.push(SchemaViolation {
                            path: format!("{}.{}", path, name),
                            message: "missing required property".to_string(),
                        });
                    }
                }
                for (name, property) in &self.properties {
                    if let Some(field) = fields.get(name) {
                        property.check(field, &format!("{}.{}", path, name), violations);
                    }
                }
            }
            _ => {}
        }
    }
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
