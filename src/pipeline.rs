use crate::aggregator::{filter_recent, Aggregator};
use crate::checkpoint::CheckpointStore;
use crate::poster::Poster;
use crate::translator::EntryTranslator;
use crate::types::Result;
use tracing::{info, warn};

/// Per-run switches, mirrored by the CLI.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub category: String,
    pub limit: usize,
    pub dry_run: bool,
    pub skip_fetch: bool,
    pub skip_translate: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            category: "uk_afrobeats".to_string(),
            limit: 5,
            dry_run: false,
            skip_fetch: false,
            skip_translate: false,
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: usize,
    pub failed_sources: usize,
    pub scheduled: usize,
    pub failed_posts: usize,
}

/// Sequences fetch, translate and post. The optional stages encode credential
/// availability: without a translator, entries pass through untranslated;
/// without a poster, the run ends with a warning before scheduling.
pub struct Pipeline {
    aggregator: Aggregator,
    translator: Option<EntryTranslator>,
    poster: Option<Poster>,
    checkpoints: CheckpointStore,
}

impl Pipeline {
    pub fn new(
        aggregator: Aggregator,
        translator: Option<EntryTranslator>,
        poster: Option<Poster>,
        checkpoints: CheckpointStore,
    ) -> Self {
        Self {
            aggregator,
            translator,
            poster,
            checkpoints,
        }
    }

    pub async fn run(&self, options: &PipelineOptions) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        // 1. Fetch, or reload the fetch checkpoint.
        let entries = if options.skip_fetch {
            info!("[1/3] Fetch: skipped, loading checkpoint");
            self.checkpoints.load_entries()?
        } else {
            info!("[1/3] Fetching feeds for category '{}'", options.category);
            let batch = self.aggregator.fetch_all_sources(&options.category).await;

            summary.failed_sources = batch.failures.len();
            for failure in &batch.failures {
                warn!("Source '{}' failed: {}", failure.source, failure.error);
            }

            let mut entries = filter_recent(batch.entries);
            entries.truncate(options.limit);
            self.checkpoints.save_entries(&entries)?;
            info!("Fetched {} entries", entries.len());
            entries
        };

        summary.entries = entries.len();
        if entries.is_empty() {
            info!("No new entries");
            return Ok(summary);
        }

        // 2. Translate, reload the translate checkpoint, or pass through.
        let translated = if options.skip_translate {
            info!("[2/3] Translation: skipped, loading checkpoint");
            self.checkpoints.load_translated()?
        } else if let Some(translator) = &self.translator {
            info!("[2/3] Translating {} entries", entries.len());
            let translated = translator.translate_entries(&entries).await?;
            self.checkpoints.save_translated(&translated)?;
            translated
        } else {
            warn!("[2/3] Translation credential not configured; continuing with untranslated entries");
            entries
        };

        // 3. Post, or dry-run.
        if options.dry_run {
            info!("[3/3] Dry run; posts that would be scheduled:");
            for entry in &translated {
                let title = entry
                    .title_ja
                    .clone()
                    .unwrap_or_else(|| entry.title.clone());
                info!("  - {}", title.chars().take(60).collect::<String>());
            }
        } else if let Some(poster) = &self.poster {
            info!("[3/3] Scheduling {} posts", translated.len());
            let report = poster.post_entries(&translated, None).await?;
            summary.scheduled = report.scheduled;
            summary.failed_posts = report.failed;
        } else {
            warn!("[3/3] Scheduling credential not configured; ending run without posting");
        }

        Ok(summary)
    }
}
