//! Prompt templates for Sanke.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub extraction: ExtractionPrompts,
}

/// Prompts for schema-constrained extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ExtractionPrompts {
    fn default() -> Self {
        Self {
            system: r#"You extract structured information from video transcripts. You receive one transcript and a JSON schema describing the fields to populate.

Rules:
- Respond with a single JSON object whose fields match the schema
- Use each field's description to decide what belongs in it
- Only report information actually present in the transcript; never invent facts
- Set optional fields the transcript says nothing about to null
- Keep text values concise, specific, and self-contained (they are read out of context later)
- Skip filler content: intros, subscription requests, sponsor reads, and outros carry no information"#
                .to_string(),

            user: r#"Schema describing the fields to extract:
{{schema}}

Transcript:
{{transcript}}

Return a single JSON object with exactly the fields described by the schema."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the defaults, with optional custom directory overrides.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let extraction_path = PathBuf::from(dir).join("extraction.toml");
            if extraction_path.exists() {
                let content = std::fs::read_to_string(&extraction_path)?;
                prompts.extraction = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
