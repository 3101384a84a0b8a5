//! Schema-constrained extraction.
//!
//! The extractor contract: raw text plus a schema in, one conforming record
//! out. The record keeps its fields in schema order so downstream
//! aggregation and rendering stay deterministic. Model replies that do not
//! conform (missing required fields, wrong shapes, non-JSON output) fail the
//! extraction; the pipeline drops that item.

mod openai;

pub use openai::OpenAiExtractor;

use crate::error::{Result, SankeError};
use crate::schema::{FieldType, Schema};
use async_trait::async_trait;

/// A value in an extracted record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single text value.
    Text(String),
    /// A list of text values.
    List(Vec<String>),
    /// A nested record.
    Record(ExtractedRecord),
    /// A list of nested records.
    Records(Vec<ExtractedRecord>),
}

/// An instance of a schema: field name to value, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ExtractedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Set a text field.
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, FieldValue::Text(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate fields in insertion (schema) order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Trait for extractors.
///
/// Implementations hold no state between calls; each call is independent.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract a record conforming to `schema` from raw text.
    async fn extract(&self, text: &str, schema: &Schema) -> Result<ExtractedRecord>;
}

/// Validate a JSON reply against a schema, producing a record in schema order.
///
/// Fields absent from the reply (or null) are skipped when optional and fail
/// the extraction when required. Unknown keys in the reply are ignored.
/// Scalars coerce to text; a bare scalar where a list is expected becomes a
/// one-element list.
pub fn parse_record(value: &serde_json::Value, schema: &Schema) -> Result<ExtractedRecord> {
    let Some(object) = value.as_object() else {
        return Err(SankeError::Extraction(format!(
            "Expected a JSON object for schema '{}'",
            schema.name
        )));
    };

    let mut record = ExtractedRecord::new();

    for field in &schema.fields {
        match object.get(&field.name) {
            None | Some(serde_json::Value::Null) => {
                if field.required {
                    return Err(SankeError::Extraction(format!(
                        "Required field '{}' missing from reply",
                        field.name
                    )));
                }
            }
            Some(raw) => {
                let parsed = parse_field_value(raw, &field.field_type, &field.name)?;
                record.set(field.name.clone(), parsed);
            }
        }
    }

    Ok(record)
}

fn parse_field_value(
    raw: &serde_json::Value,
    field_type: &FieldType,
    name: &str,
) -> Result<FieldValue> {
    use serde_json::Value;

    match field_type {
        FieldType::Text => match raw {
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
            Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
            _ => Err(mismatch(name, "text", raw)),
        },
        FieldType::TextList => match raw {
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => values.push(s.clone()),
                        Value::Number(n) => values.push(n.to_string()),
                        Value::Bool(b) => values.push(b.to_string()),
                        Value::Null => {}
                        _ => return Err(mismatch(name, "a list of text values", item)),
                    }
                }
                Ok(FieldValue::List(values))
            }
            Value::String(s) => Ok(FieldValue::List(vec![s.clone()])),
            _ => Err(mismatch(name, "a list of text values", raw)),
        },
        FieldType::Record(nested) => match raw {
            Value::Object(_) => Ok(FieldValue::Record(parse_record(raw, nested)?)),
            _ => Err(mismatch(name, "a record", raw)),
        },
        FieldType::RecordList(nested) => match raw {
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    records.push(parse_record(item, nested)?);
                }
                Ok(FieldValue::Records(records))
            }
            Value::Object(_) => Ok(FieldValue::Records(vec![parse_record(raw, nested)?])),
            _ => Err(mismatch(name, "a list of records", raw)),
        },
    }
}

fn mismatch(name: &str, expected: &str, got: &serde_json::Value) -> SankeError {
    let got = match got {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    };
    SankeError::Extraction(format!("Field '{}' should be {}, got {}", name, expected, got))
}
