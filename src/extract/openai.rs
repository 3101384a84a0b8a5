//! OpenAI-backed extractor.

use super::{parse_record, ExtractedRecord, Extractor};
use crate::config::{ExtractionPrompts, Prompts};
use crate::error::{Result, SankeError};
use crate::openai::create_client;
use crate::schema::Schema;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Extractor backed by an OpenAI chat model in JSON mode.
pub struct OpenAiExtractor {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: ExtractionPrompts,
    max_transcript_chars: usize,
}

impl OpenAiExtractor {
    /// Create an extractor for a model with the given prompts and transcript budget.
    pub fn with_config(
        model: &str,
        prompts: ExtractionPrompts,
        max_transcript_chars: usize,
    ) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            prompts,
            max_transcript_chars,
        }
    }

    fn build_user_prompt(&self, text: &str, schema: &Schema) -> String {
        let transcript = truncate(text, self.max_transcript_chars);
        let schema_json = serde_json::to_string_pretty(&schema.to_json_schema())
            .unwrap_or_else(|_| "{}".to_string());

        let mut vars = HashMap::new();
        vars.insert("schema".to_string(), schema_json);
        vars.insert("transcript".to_string(), transcript);

        Prompts::render(&self.prompts.user, &vars)
    }
}

#[async_trait]
impl Extractor for OpenAiExtractor {
    async fn extract(&self, text: &str, schema: &Schema) -> Result<ExtractedRecord> {
        let user_prompt = self.build_user_prompt(text, schema);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.system.clone())
                .build()
                .map_err(|e| SankeError::Extraction(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| SankeError::Extraction(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.0)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| SankeError::Extraction(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SankeError::OpenAI(format!("Extraction request failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SankeError::Extraction("Empty response from model".to_string()))?;

        debug!("Model replied with {} chars", content.len());

        let reply: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| SankeError::Extraction(format!("Invalid JSON reply: {}", e)))?;

        parse_record(&reply, schema)
    }
}

/// Truncate text to a character budget, marking the cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 100), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_build_user_prompt_embeds_schema_and_transcript() {
        let extractor = OpenAiExtractor::with_config(
            "gpt-4o-mini",
            ExtractionPrompts::default(),
            1_000,
        );
        let schema = Schema::new(
            "tips",
            vec![FieldSpec::new("summary", FieldType::Text, true, "The gist.")],
        );

        let prompt = extractor.build_user_prompt("the transcript text", &schema);
        assert!(prompt.contains("\"summary\""));
        assert!(prompt.contains("The gist."));
        assert!(prompt.contains("the transcript text"));
    }
}
