use crate::types::{PipelineError, Result, SourceMap};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Load the feed source configuration: a JSON mapping of category name to
/// its source list. A missing or malformed file is a configuration error.
pub fn load_sources(path: &Path) -> Result<SourceMap> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::Config(format!("cannot read source config {}: {}", path.display(), e))
    })?;

    let sources: SourceMap = serde_json::from_str(&raw).map_err(|e| {
        PipelineError::Config(format!("malformed source config {}: {}", path.display(), e))
    })?;

    for (category, group) in &sources {
        for source in &group.sources {
            if !is_valid_feed_url(&source.url) {
                warn!(
                    "Source '{}' in category '{}' has a non-HTTP URL: {}",
                    source.name, category, source.url
                );
            }
        }
        debug!("Loaded {} sources for category '{}'", group.sources.len(), category);
    }

    Ok(sources)
}

/// Validate feed URL format
pub fn is_valid_feed_url(url_str: &str) -> bool {
    if let Ok(url) = Url::parse(url_str) {
        url.scheme() == "http" || url.scheme() == "https"
    } else {
        false
    }
}
