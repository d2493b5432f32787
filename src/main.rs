use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use catalog_scraper::app::ports::{FetcherPort, ReporterPort};
use catalog_scraper::config::Config;
use catalog_scraper::constants;
use catalog_scraper::feeds::{FeedKind, ProductFeedJob};
use catalog_scraper::infra::http_client::ReqwestFetcher;
use catalog_scraper::infra::reporter::TracingReporter;
use catalog_scraper::logging;
use catalog_scraper::types::JobArguments;

#[derive(Parser)]
#[command(name = "catalog_scraper")]
#[command(about = "Multi-format product catalog feed ingester")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest one or more product feeds
    Ingest {
        /// Feeds to ingest (comma-separated). Available: json, xml, delimited, all
        #[arg(long)]
        feeds: Option<String>,
        /// Override the feed endpoint URL (applies to a single feed)
        #[arg(long)]
        url: Option<String>,
    },
}

fn requested_feeds(feeds: Option<String>) -> Vec<String> {
    let names: Vec<String> = feeds
        .map(|list| list.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_else(|| vec!["json".to_string()]);
    if names.iter().any(|name| name == "all") {
        constants::supported_feeds()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        names
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { feeds, url } => {
            let config = Config::load()?;
            let names = requested_feeds(feeds);
            if url.is_some() && names.len() > 1 {
                anyhow::bail!("--url applies to a single feed");
            }

            let fetcher: Arc<dyn FetcherPort> =
                Arc::new(ReqwestFetcher::new(Duration::from_secs(config.timeout_seconds))?);
            let reporter: Arc<dyn ReporterPort> = Arc::new(TracingReporter);
            let arguments = JobArguments::new(
                Uuid::new_v4(),
                std::env::var("CATALOG_API_KEY").unwrap_or_default(),
                HashMap::new(),
            );

            for name in names {
                let Some(kind) = FeedKind::from_name(&name) else {
                    warn!("Unknown feed specified");
                    println!("⚠️  Unknown feed: {name}");
                    continue;
                };

                let job = match &url {
                    Some(url) => ProductFeedJob::new(
                        kind,
                        fetcher.clone(),
                        url.clone(),
                        config.log_each_product,
                    ),
                    None => ProductFeedJob::from_config(kind, fetcher.clone(), &config),
                };

                info!(feed = kind.feed_name(), "starting ingestion job");
                let report = job
                    .run(&arguments, reporter.as_ref(), &CancellationToken::new())
                    .await;

                println!("\n📊 Ingestion result for {}:", kind.feed_name());
                println!("   Products mapped: {}", report.summary.succeeded);
                println!("   {}", report.summary.message);
            }
        }
    }

    Ok(())
}
