//! Error types for Sanke.

use thiserror::Error;

/// Library-level error type for Sanke operations.
#[derive(Error, Debug)]
pub enum SankeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid schema: {0}")]
    Schema(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Aggregation invariant violated: {0}")]
    Aggregation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Sanke operations.
pub type Result<T> = std::result::Result<T, SankeError>;
