//! Sanke - Transcript Harvesting and Reporting
//!
//! A CLI tool that turns a list of YouTube videos into one structured
//! Markdown report.
//!
//! The name "Sanke" comes from the Norwegian word for "gather" or "harvest."
//!
//! # Overview
//!
//! Sanke allows you to:
//! - Fetch transcripts for a batch of YouTube videos
//! - Extract structured records from each transcript with an LLM, driven by
//!   a declarative schema
//! - Aggregate the records field by field, in input order, tolerating
//!   per-video failures
//! - Render the aggregate as a Markdown report
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `source` - Source items and locator parsing
//! - `fetch` - Transcript fetching (YouTube captions)
//! - `schema` - Declarative extraction schemas and presets
//! - `extract` - Schema-constrained LLM extraction
//! - `pipeline` - Concurrent batch runner
//! - `report` - Aggregation and Markdown rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sanke::config::Settings;
//! use sanke::extract::OpenAiExtractor;
//! use sanke::fetch::YoutubeTranscriptFetcher;
//! use sanke::pipeline::Pipeline;
//! use sanke::report::{render_markdown, AggregatedReport};
//! use sanke::schema::presets;
//! use sanke::source::SourceItem;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let schema = presets::trip_tips();
//!
//!     let pipeline = Pipeline::new(
//!         Arc::new(YoutubeTranscriptFetcher::new()),
//!         Arc::new(OpenAiExtractor::with_config(
//!             &settings.extract.model,
//!             Default::default(),
//!             settings.extract.max_transcript_chars,
//!         )),
//!         schema,
//!     );
//!
//!     let items = vec![SourceItem::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ")];
//!     let results = pipeline.run(&items).await;
//!     let report = AggregatedReport::fold(&results)?;
//!     println!("{}", render_markdown(&report, &settings.report.title));
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod openai;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod source;

pub use error::{Result, SankeError};
