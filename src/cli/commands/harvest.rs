//! Harvest command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::SankeError;
use crate::extract::OpenAiExtractor;
use crate::fetch::YoutubeTranscriptFetcher;
use crate::pipeline::Pipeline;
use crate::report::{render_markdown, AggregatedReport};
use crate::schema::{presets, Schema};
use crate::source::SourceItem;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Run the harvest command.
pub async fn run_harvest(
    urls: &[String],
    input: Option<String>,
    schema: Option<String>,
    model: Option<String>,
    max_concurrent: Option<usize>,
    title: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Run) {
        Output::error(&format!("{}", e));
        Output::info("Run 'sanke doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let items = collect_items(urls, input.as_deref())?;
    if items.is_empty() {
        return Err(SankeError::InvalidInput(
            "No URLs provided. Pass them as arguments or via --input.".to_string(),
        )
        .into());
    }

    let schema_arg = schema.unwrap_or_else(|| settings.extract.schema.clone());
    let schema = resolve_schema(&schema_arg)?;

    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let model = model.unwrap_or_else(|| settings.extract.model.clone());

    let fetcher = Arc::new(YoutubeTranscriptFetcher::with_config(
        settings.fetch.languages.clone(),
        Duration::from_secs(settings.fetch.timeout_seconds),
    ));
    let extractor = Arc::new(OpenAiExtractor::with_config(
        &model,
        prompts.extraction,
        settings.extract.max_transcript_chars,
    ));

    let pipeline = Pipeline::new(fetcher, extractor, schema.clone())
        .with_max_concurrent(max_concurrent.unwrap_or(settings.pipeline.max_concurrent));

    Output::info(&format!(
        "Harvesting {} videos with schema '{}' ({})",
        items.len(),
        schema.name,
        model
    ));

    let results = pipeline.run(&items).await;
    let extracted = results.iter().filter(|r| r.is_some()).count();

    if extracted == 0 {
        Output::warning("No videos could be processed; the report will be empty.");
    } else if extracted < items.len() {
        Output::warning(&format!(
            "Skipped {} of {} videos (see log for details)",
            items.len() - extracted,
            items.len()
        ));
    }

    let report = AggregatedReport::fold(&results)?;
    let title = title.unwrap_or_else(|| settings.report.title.clone());
    let rendered = render_markdown(&report, &title);

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            Output::success(&format!(
                "Report from {} of {} videos written to {}",
                extracted,
                items.len(),
                path
            ));
        }
        None => {
            Output::info(&format!(
                "Report built from {} of {} videos",
                extracted,
                items.len()
            ));
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Gather source items from CLI arguments and an optional input file.
fn collect_items(urls: &[String], input: Option<&str>) -> Result<Vec<SourceItem>> {
    let mut items: Vec<SourceItem> = urls.iter().map(|u| SourceItem::new(u.as_str())).collect();

    if let Some(path) = input {
        let content = std::fs::read_to_string(path)?;
        items.extend(parse_input_lines(&content));
    }

    Ok(items)
}

/// Parse an input file: one URL per line, blank lines and # comments skipped.
fn parse_input_lines(content: &str) -> Vec<SourceItem> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(SourceItem::new)
        .collect()
}

/// Resolve a schema argument: a preset name, or a path to a TOML file.
fn resolve_schema(arg: &str) -> Result<Schema> {
    if let Some(schema) = presets::by_name(arg) {
        return Ok(schema);
    }

    let path = Path::new(arg);
    if path.exists() {
        return Ok(Schema::load(path)?);
    }

    Err(SankeError::InvalidInput(format!(
        "Unknown schema '{}'. Built-in schemas: {}. Or pass a path to a TOML schema file.",
        arg,
        presets::PRESET_NAMES.join(", ")
    ))
    .into())
}
