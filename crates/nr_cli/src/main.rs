use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use tracing::info;

use nr_client::{GatewayConfig, HttpGateway, DEFAULT_API_URL};
use nr_feed::{FilterStore, NewsFeed};

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the aggregation API.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,
    /// Keyword to search titles and content for.
    #[arg(long)]
    search: Option<String>,
    /// Category to read, e.g. technology. "all" reads everything.
    #[arg(long)]
    category: Option<String>,
    /// Sentiment to read, e.g. positive.
    #[arg(long)]
    sentiment: Option<String>,
    /// Source name to read, e.g. Reuters.
    #[arg(long)]
    source: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the articles matching the active filters (the default).
    Articles,
    /// Show the trending keywords.
    Trending,
    /// Show the category distribution.
    Categories,
    /// Open a single article by id.
    Read { id: String },
    /// Ingest fresh articles, run analysis, and re-read the feed.
    Refresh,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = GatewayConfig {
        base_url: cli.api_url,
        timeout: Duration::from_secs(cli.timeout),
    };
    let gateway = HttpGateway::new(config).context("gateway configuration rejected")?;
    info!("📰 reading from {}", gateway.base_url());

    // Seed the filters before the feed spawns so the first fetch cycle
    // already queries with them.
    let store = FilterStore::new();
    if let Some(search) = cli.search.as_deref() {
        store.set_search(search);
    }
    if let Some(category) = cli.category.as_deref() {
        store.set_category(category);
    }
    if let Some(sentiment) = cli.sentiment.as_deref() {
        store.set_sentiment(sentiment);
    }
    if let Some(source) = cli.source.as_deref() {
        store.set_source(source);
    }

    let feed = NewsFeed::spawn(Arc::new(gateway), &store);

    match cli.command.unwrap_or(Commands::Articles) {
        Commands::Articles => {
            let view = feed.quiescent().await;
            print!("{}", render::article_list(&view, &store.current(), Utc::now()));
        }
        Commands::Trending => {
            let view = feed.quiescent().await;
            print!("{}", render::trending(&view));
        }
        Commands::Categories => {
            let view = feed.quiescent().await;
            print!("{}", render::categories(&view));
        }
        Commands::Read { id } => {
            let view = feed.quiescent().await;
            if let Some(message) = view.error.as_deref() {
                bail!("article fetch failed: {message}");
            }
            let Some(article) = view.articles.iter().find(|a| a.id == id).cloned() else {
                bail!("no article with id {id} in the current feed");
            };

            feed.select(article).await;
            let mut rx = feed.subscribe();
            let view = rx
                .wait_for(|view| view.overlay_open)
                .await
                .context("feed stopped before the article opened")?
                .clone();
            if let Some(article) = view.selected.as_ref() {
                print!("{}", render::article_detail(article));
            }
            feed.dismiss().await;
        }
        Commands::Refresh => {
            info!("🔄 fetching fresh articles");
            feed.bulk_refresh().await?;
            let view = feed.quiescent().await;
            print!("{}", render::article_list(&view, &store.current(), Utc::now()));
        }
    }

    Ok(())
}
