use crate::types::{Entry, PipelineError, Result, SocialProfile};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

/// Platform identifier the poster schedules to.
pub const TARGET_SERVICE: &str = "twitter";

/// Character budget for the post title: the platform's 280-character ceiling
/// minus the space reserved for the bracketed source tag and the link.
pub const POST_TITLE_BUDGET: usize = 200;

pub const BUFFER_API_BASE: &str = "https://api.bufferapp.com/1";

/// Response payload from the scheduling backend; success is reported in-band.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledPostResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Trait for the scheduling/social backend.
#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<SocialProfile>>;

    async fn create_scheduled_post(
        &self,
        profile_id: &str,
        text: &str,
        link: Option<&str>,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledPostResponse>;
}

/// Buffer API client.
pub struct BufferClient {
    client: Client,
    access_token: String,
    api_base: String,
}

impl BufferClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_api_base(access_token, BUFFER_API_BASE)
    }

    pub fn with_api_base(access_token: impl Into<String>, api_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            access_token: access_token.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl ScheduleBackend for BufferClient {
    async fn list_profiles(&self) -> Result<Vec<SocialProfile>> {
        let response = self
            .client
            .get(format!("{}/profiles.json", self.api_base))
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Scheduling(format!(
                "HTTP {} listing profiles",
                status
            )));
        }

        Ok(response.json().await?)
    }

    async fn create_scheduled_post(
        &self,
        profile_id: &str,
        text: &str,
        link: Option<&str>,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledPostResponse> {
        let mut form = vec![
            ("access_token", self.access_token.clone()),
            ("profile_ids[]", profile_id.to_string()),
            ("text", text.to_string()),
            ("scheduled_at", scheduled_at.timestamp().to_string()),
        ];

        if let Some(link) = link {
            form.push(("media[link]", link.to_string()));
        }

        let response = self
            .client
            .post(format!("{}/updates/create.json", self.api_base))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Scheduling(format!(
                "HTTP {} creating scheduled post",
                status
            )));
        }

        Ok(response.json().await?)
    }
}

/// Compose the post text: translated title when present, the untranslated
/// title otherwise. Titles beyond the character budget are truncated with a
/// trailing ellipsis marker.
pub fn format_post(entry: &Entry) -> String {
    let mut title = entry
        .title_ja
        .clone()
        .unwrap_or_else(|| entry.title.clone());

    if title.chars().count() > POST_TITLE_BUDGET {
        title = title.chars().take(POST_TITLE_BUDGET).collect();
        title.push_str("...");
    }

    format!("{}\n\n[{}]\n{}", title, entry.source, entry.link)
}

/// Aggregate outcome of a posting pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostReport {
    pub attempted: usize,
    pub scheduled: usize,
    pub failed: usize,
}

pub struct Poster {
    backend: Box<dyn ScheduleBackend>,
}

impl Poster {
    pub fn new(backend: Box<dyn ScheduleBackend>) -> Self {
        Self { backend }
    }

    /// Resolve the destination profile: an explicit id wins, otherwise the
    /// first linked profile for the target service, in backend order.
    pub async fn resolve_profile(&self, profile_id: Option<String>) -> Result<String> {
        if let Some(id) = profile_id {
            return Ok(id);
        }

        let profiles = self.backend.list_profiles().await?;
        if profiles.is_empty() {
            return Err(PipelineError::Config("no linked social profiles".to_string()));
        }

        let profile = profiles
            .into_iter()
            .find(|p| p.service == TARGET_SERVICE)
            .ok_or_else(|| PipelineError::Config(format!("no linked {} profile", TARGET_SERVICE)))?;

        let display_name = if profile.formatted_username.is_empty() {
            &profile.id
        } else {
            &profile.formatted_username
        };
        info!("Using profile: {}", display_name);

        Ok(profile.id)
    }

    /// Schedule one post per entry, the first an hour from now and each
    /// subsequent post exactly one hour later. A failed post is logged and
    /// counted; the remaining entries are still attempted.
    pub async fn post_entries(
        &self,
        entries: &[Entry],
        profile_id: Option<String>,
    ) -> Result<PostReport> {
        let profile_id = self.resolve_profile(profile_id).await?;

        let mut scheduled_at = Utc::now() + ChronoDuration::hours(1);
        let mut report = PostReport::default();

        for (i, entry) in entries.iter().enumerate() {
            let text = format_post(entry);
            info!(
                "Scheduling {}/{}: {}",
                i + 1,
                entries.len(),
                text.chars().take(50).collect::<String>()
            );

            report.attempted += 1;
            match self
                .backend
                .create_scheduled_post(&profile_id, &text, None, scheduled_at)
                .await
            {
                Ok(response) if response.success => {
                    info!("  -> scheduled for {}", scheduled_at.format("%Y-%m-%d %H:%M"));
                    report.scheduled += 1;
                }
                Ok(response) => {
                    warn!("  -> rejected by backend: {}", response.message);
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("  -> failed: {}", e);
                    report.failed += 1;
                }
            }

            scheduled_at = scheduled_at + ChronoDuration::hours(1);
        }

        Ok(report)
    }
}
