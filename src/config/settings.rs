//! Configuration settings for Sanke.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub extract: ExtractSettings,
    pub pipeline: PipelineSettings,
    pub report: ReportSettings,
    pub prompts: PromptSettings,
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Caption language preference, in order.
    pub languages: Vec<String>,
    /// Timeout for caption downloads, in seconds.
    pub timeout_seconds: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            timeout_seconds: 30,
        }
    }
}

/// Extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// LLM model used for extraction.
    pub model: String,
    /// Default schema when `run` is not given one (preset name).
    pub schema: String,
    /// Transcript character budget; longer transcripts are truncated.
    pub max_transcript_chars: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            schema: "trip_tips".to_string(),
            max_transcript_chars: 50_000,
        }
    }
}

/// Pipeline execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Maximum concurrent fetch+extract tasks.
    pub max_concurrent: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { max_concurrent: 4 }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Title of the rendered Markdown report.
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Transcript Report".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SankeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sanke")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fetch.languages, vec!["en"]);
        assert_eq!(settings.extract.schema, "trip_tips");
        assert_eq!(settings.pipeline.max_concurrent, 4);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [extract]
            model = "gpt-4.1"
            "#,
        )
        .unwrap();

        assert_eq!(settings.extract.model, "gpt-4.1");
        assert_eq!(settings.extract.max_transcript_chars, 50_000);
        assert_eq!(settings.pipeline.max_concurrent, 4);
    }
}
