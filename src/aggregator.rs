use crate::fetcher::FetchFeed;
use crate::types::{Entry, SourceMap};
use tracing::{info, warn};

/// Aggregation ceiling: the first N entries in fetch order are kept.
pub const MAX_ENTRIES: usize = 10;

/// One source that failed to fetch, with the reason.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub source: String,
    pub error: String,
}

/// Aggregated fetch output: entries in source-then-feed order, plus the
/// sources that failed.
#[derive(Debug, Default)]
pub struct FetchBatch {
    pub entries: Vec<Entry>,
    pub failures: Vec<SourceFailure>,
}

pub struct Aggregator {
    sources: SourceMap,
    fetcher: Box<dyn FetchFeed>,
}

impl Aggregator {
    pub fn new(sources: SourceMap, fetcher: Box<dyn FetchFeed>) -> Self {
        Self { sources, fetcher }
    }

    /// Fetch every enabled source in a category, stamping each entry with its
    /// source name and category. A failing source is recorded and skipped;
    /// the remaining sources are still fetched. An unknown category yields an
    /// empty batch.
    pub async fn fetch_all_sources(&self, category: &str) -> FetchBatch {
        let mut batch = FetchBatch::default();

        let group = match self.sources.get(category) {
            Some(group) => group,
            None => {
                warn!("Category '{}' not found in source config", category);
                return batch;
            }
        };

        for source in &group.sources {
            if !source.enabled {
                continue;
            }

            info!("Fetching source: {}", source.name);
            match self.fetcher.fetch_feed(&source.url).await {
                Ok(mut entries) => {
                    for entry in &mut entries {
                        entry.source = source.name.clone();
                        entry.category = category.to_string();
                    }
                    info!("  -> {} entries", entries.len());
                    batch.entries.extend(entries);
                }
                Err(e) => {
                    warn!("Failed to fetch source '{}': {}", source.name, e);
                    batch.failures.push(SourceFailure {
                        source: source.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        batch
    }
}

/// Bound the aggregated list by simple prefix. Published-date formats are
/// inconsistent across providers, so no date cutoff is applied; the retained
/// entries are the first ten in fetch order, not the most recent ten.
pub fn filter_recent(entries: Vec<Entry>) -> Vec<Entry> {
    entries.into_iter().take(MAX_ENTRIES).collect()
}
