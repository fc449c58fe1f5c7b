use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One news item flowing through the pipeline, from raw feed item to
/// (optionally) translated, postable record.
///
/// Fields are additive only: each stage fills in its own fields and never
/// mutates what an earlier stage wrote. Entries carry no identity key; list
/// position within a run is the only correlation mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub author: String,
    /// Human-readable name of the originating feed, stamped by the aggregator.
    #[serde(default)]
    pub source: String,
    /// Configured grouping the entry was fetched under, stamped by the aggregator.
    #[serde(default)]
    pub category: String,
    /// Translated title, present only after the translation stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ja: Option<String>,
    /// Translated summary, present only after the translation stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_ja: Option<String>,
}

/// A configured feed source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceGroup {
    pub sources: Vec<Source>,
}

/// Feed sources grouped by category, as loaded from the config file.
pub type SourceMap = HashMap<String, SourceGroup>;

/// A linked destination account on the scheduling backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialProfile {
    pub id: String,
    pub service: String,
    #[serde(default)]
    pub formatted_username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed fetch failed: {0}")]
    Fetch(String),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("scheduling failed: {0}")]
    Scheduling(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
