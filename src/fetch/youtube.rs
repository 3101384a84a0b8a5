//! YouTube transcript fetcher.
//!
//! Metadata comes from `yt-dlp --dump-json`; the transcript itself is the
//! caption track listed in that dump, downloaded in `json3` format and
//! flattened to plain text. Manually uploaded subtitles are preferred over
//! automatic captions.

use super::{ContentFetcher, FetchedContent, META_CHANNEL, META_PUBLISH_DATE, META_TITLE};
use crate::error::{Result, SankeError};
use crate::source::{extract_video_id, watch_url};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Default timeout for caption downloads.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches YouTube video transcripts and metadata.
pub struct YoutubeTranscriptFetcher {
    http: reqwest::Client,
    languages: Vec<String>,
}

impl YoutubeTranscriptFetcher {
    /// Create a fetcher with the default language preference (English).
    pub fn new() -> Self {
        Self::with_config(vec!["en".to_string()], Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a language preference order and request timeout.
    pub fn with_config(languages: Vec<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http, languages }
    }

    /// Dump video info using yt-dlp.
    async fn fetch_video_info(&self, video_id: &str) -> Result<serde_json::Value> {
        let url = watch_url(video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SankeError::ToolNotFound("yt-dlp".to_string())
                } else {
                    SankeError::Fetch(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SankeError::Fetch(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str)
            .map_err(|e| SankeError::Fetch(format!("Failed to parse yt-dlp output: {}", e)))
    }

    /// Download a caption track and flatten it to plain text.
    async fn download_captions(&self, track_url: &str) -> Result<String> {
        let url = json3_url(track_url)?;
        debug!("Downloading captions from {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        let events: serde_json::Value = response.json().await?;

        Ok(flatten_json3(&events))
    }
}

impl Default for YoutubeTranscriptFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for YoutubeTranscriptFetcher {
    async fn fetch(&self, locator: &str) -> Result<FetchedContent> {
        let video_id = extract_video_id(locator).ok_or_else(|| {
            SankeError::Fetch(format!(
                "Not a recognized YouTube URL or video ID: {}",
                locator
            ))
        })?;

        let info = self.fetch_video_info(&video_id).await?;

        let mut metadata = HashMap::new();
        if let Some(title) = info["title"].as_str() {
            metadata.insert(META_TITLE.to_string(), title.to_string());
        }
        if let Some(channel) = info["channel"].as_str().or_else(|| info["uploader"].as_str()) {
            metadata.insert(META_CHANNEL.to_string(), channel.to_string());
        }
        if let Some(date) = info["upload_date"].as_str().and_then(format_upload_date) {
            metadata.insert(META_PUBLISH_DATE.to_string(), date);
        }

        let track_url = select_caption_track(&info, &self.languages).ok_or_else(|| {
            SankeError::Fetch(format!(
                "No captions available for {} (transcripts disabled?)",
                locator
            ))
        })?;

        let text = self.download_captions(&track_url).await?;
        if text.is_empty() {
            return Err(SankeError::Fetch(format!("Empty transcript for {}", locator)));
        }

        debug!("Fetched {} chars of transcript for {}", text.len(), video_id);

        Ok(FetchedContent {
            locator: locator.to_string(),
            text,
            metadata,
        })
    }
}

/// Format a yt-dlp upload date (YYYYMMDD) as e.g. "May 03, 2024".
fn format_upload_date(date_str: &str) -> Option<String> {
    if date_str.len() != 8 {
        return None;
    }
    chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
        .ok()
        .map(|d| d.format("%B %d, %Y").to_string())
}

/// Pick a caption track URL from a yt-dlp info dump.
///
/// Manual subtitles win over automatic captions; within a language, a track
/// already in json3 format wins over the first listed one.
fn select_caption_track(info: &serde_json::Value, languages: &[String]) -> Option<String> {
    for key in ["subtitles", "automatic_captions"] {
        let Some(tracks_by_lang) = info[key].as_object() else {
            continue;
        };

        for lang in languages {
            let tracks = tracks_by_lang.get(lang).or_else(|| {
                // Fall back to regional variants, e.g. "en" -> "en-US"
                tracks_by_lang
                    .iter()
                    .find(|(name, _)| name.starts_with(&format!("{}-", lang)))
                    .map(|(_, v)| v)
            });

            let Some(entries) = tracks.and_then(|t| t.as_array()) else {
                continue;
            };

            let chosen = entries
                .iter()
                .find(|e| e["ext"].as_str() == Some("json3"))
                .or_else(|| entries.first());

            if let Some(url) = chosen.and_then(|e| e["url"].as_str()) {
                return Some(url.to_string());
            }
        }
    }

    None
}

/// Ensure a caption track URL requests the json3 format.
fn json3_url(track_url: &str) -> Result<url::Url> {
    let mut url = url::Url::parse(track_url)
        .map_err(|e| SankeError::Fetch(format!("Invalid caption track URL: {}", e)))?;

    let has_fmt = url.query_pairs().any(|(k, v)| k == "fmt" && v == "json3");
    if !has_fmt {
        url.query_pairs_mut().append_pair("fmt", "json3");
    }

    Ok(url)
}

/// Flatten a json3 caption document to whitespace-normalized plain text.
fn flatten_json3(events: &serde_json::Value) -> String {
    let mut text = String::new();

    if let Some(events) = events["events"].as_array() {
        for event in events {
            if let Some(segs) = event["segs"].as_array() {
                for seg in segs {
                    if let Some(utf8) = seg["utf8"].as_str() {
                        text.push_str(utf8);
                        text.push(' ');
                    }
                }
            }
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
