//! # CLIR News Scraper
//!
//! Builds the raw article corpus for a Bangla/English cross-language
//! information-retrieval dataset by crawling ten Bangladeshi news sites
//! (five Bangla, five English) and writing the extracted articles to JSON.
//!
//! ## Usage
//!
//! ```sh
//! clir_news_scraper
//! RUST_LOG=debug clir_news_scraper --target-per-site 20 -o /tmp/raw
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pipeline:
//! 1. **Registry**: the configured sites, Bangla group first
//! 2. **Collection**: per site, a category sweep then a pagination fallback,
//!    classifying links, fetching candidates and extracting articles until
//!    the per-site target is met or listings run dry
//! 3. **Checkpoint**: the language's articles are written after every site
//! 4. **Output**: final per-language and combined JSON files, then a summary

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod sites;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use models::Language;
use outputs::{json, summary};
use scrapers::collect::Collector;
use scrapers::fetch::HttpFetcher;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("clir_news_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = CrawlConfig::load(args.config.as_deref()).await?;
    if let Some(target) = args.target_per_site {
        config.target_per_site = target;
    }
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }
    info!(
        target_per_site = config.target_per_site,
        language_target = config.language_target,
        max_pages = config.max_pages,
        "Configuration ready"
    );

    // Fail before any network work if results could not be saved.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new(&config.http)?;
    let groups = config.sites.groups();
    let language_target = config.language_target;
    let collector = Collector::new(fetcher, config);

    let mut bangla = Vec::new();
    let mut english = Vec::new();
    for group in &groups {
        info!(language = %group.language, sites = group.sites.len(), "Collecting language group");
        let articles = collector.collect_group(group, Some(&args.output_dir)).await;
        match group.language {
            Language::Bn => bangla = articles,
            Language::En => english = articles,
        }
    }

    json::write_final(&args.output_dir, &bangla, &english).await?;

    let summaries: Vec<_> = groups
        .iter()
        .map(|g| {
            let articles = match g.language {
                Language::Bn => &bangla,
                Language::En => &english,
            };
            summary::summarize(g, articles, language_target)
        })
        .collect();
    summary::report(&summaries);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        output_dir = %args.output_dir.display(),
        "Execution complete"
    );

    Ok(())
}
