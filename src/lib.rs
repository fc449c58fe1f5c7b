pub mod types;
pub mod config;
pub mod fetcher;
pub mod aggregator;
pub mod translator;
pub mod poster;
pub mod checkpoint;
pub mod pipeline;

pub use types::*;
pub use config::load_sources;
pub use fetcher::{parse_entries, FetchConfig, FetchFeed, Fetcher};
pub use aggregator::{filter_recent, Aggregator, FetchBatch, SourceFailure, MAX_ENTRIES};
pub use translator::{DeepLTranslator, EntryTranslator, Translate};
pub use poster::{
    format_post, BufferClient, PostReport, Poster, ScheduleBackend, ScheduledPostResponse,
    POST_TITLE_BUDGET, TARGET_SERVICE,
};
pub use checkpoint::CheckpointStore;
pub use pipeline::{Pipeline, PipelineOptions, RunSummary};
