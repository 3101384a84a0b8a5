//! Configuration module for Sanke.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ExtractionPrompts, Prompts};
pub use settings::{
    ExtractSettings, FetchSettings, PipelineSettings, PromptSettings, ReportSettings, Settings,
};
