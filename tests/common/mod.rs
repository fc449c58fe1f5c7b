#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use news_autopost::{
    Entry, FetchFeed, PipelineError, Result, ScheduleBackend, ScheduledPostResponse,
    SocialProfile, Translate,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

pub fn entry(title: &str) -> Entry {
    Entry {
        title: title.to_string(),
        link: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        ..Entry::default()
    }
}

/// Feed fetcher double returning canned entries per URL.
pub struct MockFetcher {
    feeds: HashMap<String, Vec<Entry>>,
    failing: Vec<String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            feeds: HashMap::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_feed(mut self, url: &str, entries: Vec<Entry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }

    pub fn with_failing(mut self, url: &str) -> Self {
        self.failing.push(url.to_string());
        self
    }
}

#[async_trait]
impl FetchFeed for MockFetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<Entry>> {
        if self.failing.iter().any(|u| u == url) {
            return Err(PipelineError::Fetch(format!("connection refused: {}", url)));
        }
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| PipelineError::Fetch(format!("unknown feed: {}", url)))
    }
}

/// Translation double that records every call and appends a marker suffix.
pub struct MockTranslator {
    pub calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    /// Fail the batch when asked to translate this exact text.
    pub fn failing_on(text: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(text.to_string()),
        }
    }
}

#[async_trait]
impl Translate for MockTranslator {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail_on.as_deref() == Some(text) {
            return Err(PipelineError::Translation("quota exceeded".to_string()));
        }
        Ok(format!("{}の日本語訳", text))
    }
}

#[derive(Debug, Clone)]
pub struct ScheduledCall {
    pub profile_id: String,
    pub text: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Scheduling double that records every create call; selected call indices
/// can be made to report failure in the response payload.
pub struct MockScheduler {
    pub profiles: Vec<SocialProfile>,
    pub calls: Arc<Mutex<Vec<ScheduledCall>>>,
    fail_indices: Vec<usize>,
    counter: AtomicUsize,
}

impl MockScheduler {
    pub fn new(profiles: Vec<SocialProfile>) -> Self {
        Self {
            profiles,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_indices: Vec::new(),
            counter: AtomicUsize::new(0),
        }
    }

    pub fn with_failure_at(mut self, index: usize) -> Self {
        self.fail_indices.push(index);
        self
    }
}

pub fn twitter_profile(id: &str, username: &str) -> SocialProfile {
    SocialProfile {
        id: id.to_string(),
        service: "twitter".to_string(),
        formatted_username: username.to_string(),
    }
}

pub fn profile(id: &str, service: &str) -> SocialProfile {
    SocialProfile {
        id: id.to_string(),
        service: service.to_string(),
        formatted_username: String::new(),
    }
}

#[async_trait]
impl ScheduleBackend for MockScheduler {
    async fn list_profiles(&self) -> Result<Vec<SocialProfile>> {
        Ok(self.profiles.clone())
    }

    async fn create_scheduled_post(
        &self,
        profile_id: &str,
        text: &str,
        _link: Option<&str>,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledPostResponse> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(ScheduledCall {
            profile_id: profile_id.to_string(),
            text: text.to_string(),
            scheduled_at,
        });

        if self.fail_indices.contains(&index) {
            return Ok(ScheduledPostResponse {
                success: false,
                message: "over the posting limit".to_string(),
            });
        }

        Ok(ScheduledPostResponse {
            success: true,
            message: String::new(),
        })
    }
}
