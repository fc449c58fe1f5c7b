use clap::Parser;
use news_autopost::{
    load_sources, Aggregator, BufferClient, CheckpointStore, DeepLTranslator, EntryTranslator,
    FetchConfig, Fetcher, Pipeline, PipelineOptions, Poster,
};
use std::env;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "news-autopost",
    about = "Fetch music-scene news feeds, translate them, and schedule social posts"
)]
struct Cli {
    /// Category of sources to fetch
    #[arg(long, default_value = "uk_afrobeats")]
    category: String,

    /// Maximum number of posts per run
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Print the posts without scheduling them
    #[arg(long)]
    dry_run: bool,

    /// Reload the fetch checkpoint instead of fetching
    #[arg(long)]
    skip_fetch: bool,

    /// Reload the translation checkpoint instead of translating
    #[arg(long)]
    skip_translate: bool,

    /// Path to the source configuration file
    #[arg(long, default_value = "config/sources.json")]
    config: PathBuf,

    /// Directory for checkpoint files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let sources = load_sources(&cli.config)?;
    let fetcher = Fetcher::new(FetchConfig::default());
    let aggregator = Aggregator::new(sources, Box::new(fetcher));

    // Credentials are read once here and handed to the constructors; an
    // absent credential selects the corresponding skip path in the pipeline.
    let translator = env::var("DEEPL_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .map(|key| EntryTranslator::new(Box::new(DeepLTranslator::new(key))));

    let poster = env::var("BUFFER_ACCESS_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
        .map(|token| Poster::new(Box::new(BufferClient::new(token))));

    let pipeline = Pipeline::new(
        aggregator,
        translator,
        poster,
        CheckpointStore::new(&cli.data_dir),
    );

    let options = PipelineOptions {
        category: cli.category,
        limit: cli.limit,
        dry_run: cli.dry_run,
        skip_fetch: cli.skip_fetch,
        skip_translate: cli.skip_translate,
    };

    let summary = pipeline.run(&options).await?;

    info!(
        "Run complete: {} entries, {} failed sources, {} posts scheduled, {} failed",
        summary.entries, summary.failed_sources, summary.scheduled, summary.failed_posts
    );

    Ok(())
}
