//! Pipeline runner for Sanke.
//!
//! Drives the batch: one fetch+extract task per source item, run
//! concurrently, with per-item failures dropped and logged. Results are
//! index-aligned with the input — completion order never changes where a
//! record lands, so the aggregate is deterministic with respect to input
//! order.

use crate::error::Result;
use crate::extract::{ExtractedRecord, Extractor};
use crate::fetch::{ContentFetcher, META_PUBLISH_DATE};
use crate::schema::Schema;
use crate::source::SourceItem;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default number of concurrent fetch+extract tasks.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// The batch runner: fetch, extract, and stamp source metadata per item.
pub struct Pipeline {
    fetcher: Arc<dyn ContentFetcher>,
    extractor: Arc<dyn Extractor>,
    schema: Schema,
    max_concurrent: usize,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        extractor: Arc<dyn Extractor>,
        schema: Schema,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            schema,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set the maximum number of concurrent tasks.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Run the batch.
    ///
    /// The returned sequence is aligned index-for-index with `items`: the
    /// result for item *i* is at position *i*, with `None` where any stage
    /// failed for that item. A batch where every item fails still completes
    /// and returns all-`None`.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn run(&self, items: &[SourceItem]) -> Vec<Option<ExtractedRecord>> {
        let mut results: Vec<Option<ExtractedRecord>> = Vec::with_capacity(items.len());
        results.resize_with(items.len(), || None);

        if items.is_empty() {
            return results;
        }

        info!("Processing {} items", items.len());

        let pb = ProgressBar::new(items.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} Extracting [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        // Tasks complete in any order; the index tag decides where each
        // result is written.
        let mut stream = stream::iter(items.iter().enumerate())
            .map(|(index, item)| async move { (index, self.process_item(item).await) })
            .buffer_unordered(self.max_concurrent);

        while let Some((index, result)) = stream.next().await {
            pb.inc(1);
            match result {
                Ok(record) => results[index] = Some(record),
                Err(e) => warn!("Skipping {}: {}", items[index].locator, e),
            }
        }

        pb.finish_and_clear();

        let extracted = results.iter().filter(|r| r.is_some()).count();
        info!("Batch complete: {}/{} items extracted", extracted, items.len());

        results
    }

    /// Fetch and extract one item, then stamp its source metadata.
    async fn process_item(&self, item: &SourceItem) -> Result<ExtractedRecord> {
        debug!("Fetching {}", item.locator);
        let content = self.fetcher.fetch(&item.locator).await?;

        debug!("Extracting from {} chars", content.text.len());
        let mut record = self.extractor.extract(&content.text, &self.schema).await?;

        if let Some(date) = content.metadata.get(META_PUBLISH_DATE) {
            record.set_text("publish_date", date.clone());
        }
        record.set_text("video_url", item.locator.clone());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SankeError;
    use crate::extract::FieldValue;
    use crate::fetch::FetchedContent;
    use crate::schema::{FieldSpec, FieldType};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    struct StubFetcher {
        fail_on: HashSet<String>,
        delay_ms: HashMap<String, u64>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                fail_on: HashSet::new(),
                delay_ms: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl ContentFetcher for StubFetcher {
        async fn fetch(&self, locator: &str) -> Result<FetchedContent> {
            if let Some(delay) = self.delay_ms.get(locator) {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
            }
            if self.fail_on.contains(locator) {
                return Err(SankeError::Fetch(format!("no captions for {}", locator)));
            }

            let mut metadata = HashMap::new();
            metadata.insert(META_PUBLISH_DATE.to_string(), "January 01, 2024".to_string());

            Ok(FetchedContent {
                locator: locator.to_string(),
                text: format!("transcript for {}", locator),
                metadata,
            })
        }
    }

    struct StubExtractor {
        fail_on_text: Option<String>,
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(&self, text: &str, _schema: &Schema) -> Result<ExtractedRecord> {
            if let Some(marker) = &self.fail_on_text {
                if text.contains(marker) {
                    return Err(SankeError::Extraction("malformed output".to_string()));
                }
            }
            let mut record = ExtractedRecord::new();
            record.set_text("note", text.to_string());
            Ok(record)
        }
    }

    fn test_schema() -> Schema {
        Schema::new(
            "test",
            vec![FieldSpec::new("note", FieldType::Text, true, "")],
        )
    }

    fn items(locators: &[&str]) -> Vec<SourceItem> {
        locators.iter().map(|l| SourceItem::new(*l)).collect()
    }

    fn note_of(record: &ExtractedRecord) -> &str {
        match record.get("note") {
            Some(FieldValue::Text(s)) => s,
            other => panic!("unexpected note value: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_results_align_with_input_order() {
        // Earlier items sleep longer, so completion order is reversed
        let mut fetcher = StubFetcher::new();
        let locators = ["v0", "v1", "v2", "v3", "v4"];
        for (i, locator) in locators.iter().enumerate() {
            fetcher
                .delay_ms
                .insert(locator.to_string(), 20 * (locators.len() - i) as u64);
        }

        let pipeline = Pipeline::new(
            Arc::new(fetcher),
            Arc::new(StubExtractor { fail_on_text: None }),
            test_schema(),
        )
        .with_max_concurrent(locators.len());

        let results = pipeline.run(&items(&locators)).await;

        assert_eq!(results.len(), locators.len());
        for (i, result) in results.iter().enumerate() {
            let record = result.as_ref().expect("all items succeed");
            assert_eq!(note_of(record), format!("transcript for v{}", i));
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        let mut fetcher = StubFetcher::new();
        fetcher.fail_on.insert("bad".to_string());

        let pipeline = Pipeline::new(
            Arc::new(fetcher),
            Arc::new(StubExtractor { fail_on_text: None }),
            test_schema(),
        );

        let results = pipeline.run(&items(&["ok1", "bad", "ok2"])).await;

        assert!(results[0].is_some());
        assert!(results[1].is_none());
        assert!(results[2].is_some());
    }

    #[tokio::test]
    async fn test_extraction_failure_is_isolated() {
        let pipeline = Pipeline::new(
            Arc::new(StubFetcher::new()),
            Arc::new(StubExtractor {
                fail_on_text: Some("poison".to_string()),
            }),
            test_schema(),
        );

        let results = pipeline.run(&items(&["fine", "poison", "fine2"])).await;

        assert!(results[0].is_some());
        assert!(results[1].is_none());
        assert!(results[2].is_some());
    }

    #[tokio::test]
    async fn test_all_failures_still_complete() {
        let mut fetcher = StubFetcher::new();
        for locator in ["a", "b", "c"] {
            fetcher.fail_on.insert(locator.to_string());
        }

        let pipeline = Pipeline::new(
            Arc::new(fetcher),
            Arc::new(StubExtractor { fail_on_text: None }),
            test_schema(),
        );

        let results = pipeline.run(&items(&["a", "b", "c"])).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_none()));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let pipeline = Pipeline::new(
            Arc::new(StubFetcher::new()),
            Arc::new(StubExtractor { fail_on_text: None }),
            test_schema(),
        );

        let results = pipeline.run(&[]).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_source_metadata_is_stamped() {
        let pipeline = Pipeline::new(
            Arc::new(StubFetcher::new()),
            Arc::new(StubExtractor { fail_on_text: None }),
            test_schema(),
        );

        let results = pipeline.run(&items(&["v0"])).await;
        let record = results[0].as_ref().unwrap();

        assert_eq!(
            record.get("video_url"),
            Some(&FieldValue::Text("v0".to_string()))
        );
        assert_eq!(
            record.get("publish_date"),
            Some(&FieldValue::Text("January 01, 2024".to_string()))
        );
    }
}
