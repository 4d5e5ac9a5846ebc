//! Command-line interface definitions.
//!
//! Every option is optional: running the binary with no arguments collects
//! both language groups with the built-in registry and writes to `data/raw`.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Full run with built-in defaults
/// clir_news_scraper
///
/// # Smaller run with replacement URL templates
/// clir_news_scraper --target-per-site 50 --config crawl.yaml -o /tmp/raw
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory for checkpoint and final JSON files
    #[arg(short, long, env = "CLIR_OUTPUT_DIR", default_value = "data/raw")]
    pub output_dir: PathBuf,

    /// Optional YAML file overriding sites, URL templates, targets or throttle
    #[arg(short, long, env = "CLIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Articles to collect per site (overrides the config file)
    #[arg(short, long)]
    pub target_per_site: Option<usize>,

    /// Highest page number requested per paged listing (overrides the config file)
    #[arg(long)]
    pub max_pages: Option<u32>,
}
