use crate::types::{Entry, PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "news-autopost/0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Trait for fetching normalized entries from a feed URL, so callers can
/// substitute a test double for the HTTP fetcher.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<Entry>>;
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl FetchFeed for Fetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<Entry>> {
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Fetch(format!("HTTP {} from {}", status, url)));
        }

        let body = response.bytes().await?;
        let entries = parse_entries(&body)?;

        info!("Fetched {} entries from {}", entries.len(), url);
        Ok(entries)
    }
}

/// Parse a syndication feed document into normalized entries. Every missing
/// item field falls back to an empty string; a missing field never fails the
/// parse.
pub fn parse_entries(content: &[u8]) -> Result<Vec<Entry>> {
    let feed = feed_rs::parser::parse(content)
        .map_err(|e| PipelineError::Parse(format!("failed to parse feed: {}", e)))?;

    Ok(feed.entries.into_iter().map(normalize_entry).collect())
}

fn normalize_entry(item: feed_rs::model::Entry) -> Entry {
    Entry {
        link: item.links.first().map(|l| l.href.clone()).unwrap_or_default(),
        author: item
            .authors
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        title: item.title.map(|t| t.content).unwrap_or_default(),
        published: item.published.map(|dt| dt.to_rfc2822()).unwrap_or_default(),
        summary: item.summary.map(|s| s.content).unwrap_or_default(),
        ..Entry::default()
    }
}
