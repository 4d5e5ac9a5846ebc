//! Crawl configuration: targets, URL templates, throttle and site registry.
//!
//! Every value has a compiled-in default, so the collector runs with no
//! configuration at all. An optional YAML file can replace any subset of
//! fields; omitted fields keep their defaults.
//!
//! # Example
//!
//! ```yaml
//! target_per_site: 100
//! category_templates:
//!   - "{base}/{category}"
//! pagination_templates:
//!   - "{base}/latest"
//! throttle:
//!   min_ms: 500
//!   max_ms: 1500
//! sites:
//!   english:
//!     - name: The Daily Star
//!       base_url: https://www.thedailystar.net
//! ```
//!
//! Listing URLs are guesses about each site's structure, which is why they
//! are templates rather than code. `{base}` is replaced by the site's base
//! URL (no trailing slash) and `{category}` by the category slug.

use crate::error::ConfigError;
use crate::sites::Registry;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// A listing-URL shape such as `{base}/category/{category}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct UrlTemplate(pub String);

impl UrlTemplate {
    pub fn new(template: &str) -> Self {
        Self(template.to_string())
    }

    /// Substitute `{base}` and, when given, `{category}`.
    pub fn render(&self, base: &str, category: Option<&str>) -> String {
        let url = self.0.replace("{base}", base.trim_end_matches('/'));
        match category {
            Some(category) => url.replace("{category}", category),
            None => url,
        }
    }
}

/// Random pause inserted after every accepted article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Throttle {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            min_ms: 300,
            max_ms: 1000,
        }
    }
}

impl Throttle {
    #[cfg(test)]
    pub const NONE: Throttle = Throttle { min_ms: 0, max_ms: 0 };

    /// Pick a delay uniformly from `min_ms..=max_ms`.
    pub fn next_delay(&self) -> Duration {
        let (lo, hi) = if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        };
        Duration::from_millis(rng().random_range(lo..=hi))
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            debug!(?delay, "Throttling before next article");
            sleep(delay).await;
        }
    }
}

/// HTTP settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Everything the collector needs to know about a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Articles to collect per site before moving on.
    pub target_per_site: usize,
    /// Articles wanted per language; only used to grade the summary.
    pub language_target: usize,
    /// Highest page number requested per pagination template.
    pub max_pages: u32,
    pub categories: Vec<String>,
    pub category_templates: Vec<UrlTemplate>,
    pub pagination_templates: Vec<UrlTemplate>,
    pub throttle: Throttle,
    pub http: HttpConfig,
    pub sites: Registry,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            target_per_site: 520,
            language_target: 2600,
            max_pages: 50,
            categories: [
                "bangladesh",
                "national",
                "politics",
                "business",
                "sports",
                "world",
                "entertainment",
                "technology",
                "health",
                "education",
                "opinion",
                "lifestyle",
                "economy",
                "culture",
                "environment",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            category_templates: vec![
                UrlTemplate::new("{base}/{category}"),
                UrlTemplate::new("{base}/category/{category}"),
                UrlTemplate::new("{base}/{category}/news"),
            ],
            pagination_templates: vec![
                UrlTemplate::new("{base}/collection/latest"),
                UrlTemplate::new("{base}/latest"),
                UrlTemplate::new("{base}/all-news"),
                UrlTemplate::new("{base}/archive"),
                UrlTemplate::new("{base}"),
            ],
            throttle: Throttle::default(),
            http: HttpConfig::default(),
            sites: Registry::default(),
        }
    }
}

impl CrawlConfig {
    /// Parse a YAML document on top of the defaults.
    pub fn from_yaml(text: &str, path: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load from `path`, or return the defaults when no path is given.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional YAML file; fields it leaves out keep their defaults
    ///
    /// # Returns
    ///
    /// The merged configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid YAML for this shape.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("No config file given; using built-in defaults");
            return Ok(Self::default());
        };
        let path_display = path.display().to_string();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path_display.clone(),
                source,
            })?;
        let config = Self::from_yaml(&text, &path_display)?;
        info!(path = %path_display, "Loaded crawl configuration");
        Ok(config)
    }

    /// Category listing candidates for `base`, in the order they are tried.
    pub fn category_urls(&self, base: &str, category: &str) -> Vec<String> {
        self.category_templates
            .iter()
            .map(|t| t.render(base, Some(category)))
            .collect()
    }

    /// Paged listing roots for `base`, in the order they are tried.
    pub fn pagination_roots(&self, base: &str) -> Vec<String> {
        self.pagination_templates
            .iter()
            .map(|t| t.render(base, None))
            .collect()
    }
}

/// Page `n` of a paged listing.
pub fn page_url(listing: &str, page: u32) -> String {
    format!("{listing}?page={page}")
}
