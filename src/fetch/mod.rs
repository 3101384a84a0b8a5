//! Content fetching for Sanke.
//!
//! Provides a trait-based interface for turning a locator into raw text
//! content plus whatever metadata the source can supply. Fetching is a
//! per-item operation with no retries; a failure drops that item from the
//! batch.

mod youtube;

pub use youtube::YoutubeTranscriptFetcher;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Metadata key for the content title.
pub const META_TITLE: &str = "title";
/// Metadata key for the publish date (human-readable, e.g. "May 03, 2024").
pub const META_PUBLISH_DATE: &str = "publish_date";
/// Metadata key for the channel or author name.
pub const META_CHANNEL: &str = "channel";

/// Raw content fetched for one source item.
///
/// Ownership passes to the extractor as soon as the item is processed;
/// nothing here outlives the per-item task.
#[derive(Debug, Clone)]
pub struct FetchedContent {
    /// The locator this content was fetched for.
    pub locator: String,
    /// The raw unstructured text (transcript).
    pub text: String,
    /// Optional metadata supplied by the source (title, publish date, ...).
    pub metadata: HashMap<String, String>,
}

/// Trait for content fetchers.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch raw text content for a locator.
    async fn fetch(&self, locator: &str) -> Result<FetchedContent>;
}
