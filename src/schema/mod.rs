//! Declarative extraction schemas.
//!
//! A schema describes the fields the extractor must populate: name, type,
//! required flag, and a description that doubles as the extraction hint.
//! Schemas are fixed at configuration time — picked from the built-in
//! presets or loaded from a TOML file — and passed by value into the
//! extractor. Nested schemas are owned by their parent field, so nesting is
//! always finite.

pub mod presets;

use crate::error::{Result, SankeError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::path::Path;

/// A named, ordered set of field definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name (used for preset lookup and report defaults).
    pub name: String,
    /// Field definitions, in extraction and report order.
    pub fields: Vec<FieldSpec>,
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name; unique within its schema.
    pub name: String,
    /// Value shape the extractor must produce.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether extraction fails when the field is absent.
    #[serde(default)]
    pub required: bool,
    /// Human-readable description, passed to the model as an extraction hint.
    #[serde(default)]
    pub description: String,
}

impl FieldSpec {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            description: description.into(),
        }
    }

    fn to_json_schema(&self) -> serde_json::Value {
        let mut value = match &self.field_type {
            FieldType::Text => json!({"type": "string"}),
            FieldType::TextList => json!({"type": "array", "items": {"type": "string"}}),
            FieldType::Record(nested) => nested.to_json_schema(),
            FieldType::RecordList(nested) => {
                json!({"type": "array", "items": nested.to_json_schema()})
            }
        };

        if !self.description.is_empty() {
            value["description"] = json!(self.description);
        }

        value
    }
}

/// Value shape of a schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A single text value.
    Text,
    /// A list of text values.
    TextList,
    /// A nested record described by its own schema.
    Record(Schema),
    /// A list of nested records sharing one schema.
    RecordList(Schema),
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Load a schema from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let schema: Schema = toml::from_str(&content)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Validate the schema: non-empty field names, unique within each level.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SankeError::Schema(format!(
                    "Schema '{}' has a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SankeError::Schema(format!(
                    "Schema '{}' has duplicate field '{}'",
                    self.name, field.name
                )));
            }
            match &field.field_type {
                FieldType::Record(nested) | FieldType::RecordList(nested) => nested.validate()?,
                FieldType::Text | FieldType::TextList => {}
            }
        }

        Ok(())
    }

    /// Render the schema as a JSON-schema-shaped value.
    ///
    /// This is what the extractor embeds in the prompt; field descriptions
    /// become the model's extraction hints.
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            properties.insert(field.name.clone(), field.to_json_schema());
            if field.required {
                required.push(json!(field.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(
            "sample",
            vec![
                FieldSpec::new("headline", FieldType::Text, true, "The headline."),
                FieldSpec::new("tags", FieldType::TextList, false, "Relevant tags."),
            ],
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_schema().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let schema = Schema::new(
            "dup",
            vec![
                FieldSpec::new("x", FieldType::Text, true, ""),
                FieldSpec::new("x", FieldType::Text, false, ""),
            ],
        );

        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SankeError::Schema(_)));
    }

    #[test]
    fn test_validate_nested_duplicate() {
        let nested = Schema::new(
            "inner",
            vec![
                FieldSpec::new("y", FieldType::Text, true, ""),
                FieldSpec::new("y", FieldType::Text, true, ""),
            ],
        );
        let schema = Schema::new(
            "outer",
            vec![FieldSpec::new("inner", FieldType::Record(nested), true, "")],
        );

        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_to_json_schema() {
        let value = sample_schema().to_json_schema();

        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["headline"]["type"], "string");
        assert_eq!(
            value["properties"]["headline"]["description"],
            "The headline."
        );
        assert_eq!(value["properties"]["tags"]["type"], "array");
        assert_eq!(value["required"], serde_json::json!(["headline"]));
    }

    #[test]
    fn test_toml_round_trip() {
        let schema = Schema::new(
            "toml",
            vec![
                FieldSpec::new("summary", FieldType::Text, true, "One-line summary."),
                FieldSpec::new(
                    "places",
                    FieldType::RecordList(Schema::new(
                        "place",
                        vec![FieldSpec::new("name", FieldType::Text, true, "Place name.")],
                    )),
                    false,
                    "Places mentioned.",
                ),
            ],
        );

        let text = toml::to_string(&schema).unwrap();
        let parsed: Schema = toml::from_str(&text).unwrap();
        assert_eq!(parsed, schema);
    }
}
