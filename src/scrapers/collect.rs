//! The per-site collection loop.
//!
//! For each site the loop runs two phases until the per-site target is met:
//!
//! 1. **Category sweep**: for every category, the configured listing shapes
//!    are tried in order and the first one that fetches is harvested.
//! 2. **Pagination fallback**: only when the sweep fell short. Each paged
//!    listing is walked `?page=1..=max_pages` and abandoned at the first page
//!    that yields no new article.
//!
//! Harvesting a listing means: collect its links, keep same-site links that
//! [`is_article`] accepts and that were not seen before, fetch and extract
//! each one, and pause for the configured throttle after every success.
//! Failures are counted and logged; none of them stop the loop.

use crate::config::{CrawlConfig, page_url};
use crate::error::CandidateError;
use crate::models::{Article, Language};
use crate::outputs::json::write_checkpoint;
use crate::scrapers::classify::{is_article, same_site, site_host};
use crate::scrapers::extract::{extract, listing_links};
use crate::scrapers::fetch::Fetch;
use crate::sites::{Site, SiteGroup};
use crate::utils::truncate_for_log;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// What one site produced, plus counters for the run summary.
#[derive(Debug, Default)]
pub struct SiteReport {
    pub source: String,
    pub articles: Vec<Article>,
    /// Candidate URLs fetched as possible articles.
    pub candidates: usize,
    pub fetch_failures: usize,
    pub rejections: usize,
    /// Listing pages that fetched successfully.
    pub listings: usize,
}

/// Fetch `url` and run the extractor over it.
#[instrument(level = "debug", skip(fetcher))]
pub async fn scrape_article<F: Fetch>(
    fetcher: &F,
    url: &str,
    language: Language,
    source: &str,
) -> Result<Article, CandidateError> {
    let html = fetcher.fetch(url).await?;
    Ok(extract(&html, language, source, url)?)
}

/// Mutable state of one site's crawl.
struct SiteCrawl<'a> {
    site: &'a Site,
    language: Language,
    target: usize,
    host: Option<String>,
    visited: HashSet<String>,
    report: SiteReport,
}

impl<'a> SiteCrawl<'a> {
    fn new(site: &'a Site, language: Language, target: usize) -> Self {
        let host = Url::parse(&site.base_url).ok().as_ref().and_then(site_host);
        Self {
            site,
            language,
            target,
            host,
            visited: HashSet::new(),
            report: SiteReport {
                source: site.name.clone(),
                ..SiteReport::default()
            },
        }
    }

    fn done(&self) -> bool {
        self.report.articles.len() >= self.target
    }

    /// Marks `link` visited and returns whether it should be fetched.
    fn claim(&mut self, link: &Url) -> bool {
        if let Some(host) = &self.host {
            if !same_site(link, host) {
                return false;
            }
        }
        if !is_article(link.as_str()) {
            return false;
        }
        self.visited.insert(link.as_str().to_string())
    }
}

/// Owns the fetcher and configuration for a whole run.
#[derive(Debug)]
pub struct Collector<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: Fetch> Collector<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    /// Collect every site of a language group in order.
    ///
    /// When `checkpoint_dir` is set, the articles gathered so far are written
    /// there after each site. A failed checkpoint is logged, not fatal.
    ///
    /// # Arguments
    ///
    /// * `group` - The sites to visit and the language their articles get
    /// * `checkpoint_dir` - Directory for `<language>_articles_temp.json`, or
    ///   `None` to skip checkpoints
    ///
    /// # Returns
    ///
    /// Every accepted article of the group, in site order.
    #[instrument(level = "info", skip_all, fields(language = %group.language))]
    pub async fn collect_group(&self, group: &SiteGroup, checkpoint_dir: Option<&Path>) -> Vec<Article> {
        let mut articles = Vec::new();
        for site in &group.sites {
            let report = self.collect_site(site, group.language).await;
            info!(
                source = %report.source,
                collected = report.articles.len(),
                group_total = articles.len() + report.articles.len(),
                "Site added to language group"
            );
            articles.extend(report.articles);
            if let Some(dir) = checkpoint_dir {
                if let Err(e) = write_checkpoint(dir, group.language, &articles).await {
                    warn!(error = %e, source = %site.name, "Failed to write checkpoint");
                }
            }
        }
        info!(count = articles.len(), "Language group complete");
        articles
    }

    /// Run both phases against one site.
    ///
    /// The category sweep runs first; the pagination fallback only starts
    /// when the sweep ends below `target_per_site`.
    ///
    /// # Arguments
    ///
    /// * `site` - Name and base URL of the site
    /// * `language` - Language recorded on every article from this site
    ///
    /// # Returns
    ///
    /// A [`SiteReport`] with the accepted articles, at most
    /// `target_per_site`. Fetch and extraction failures are counted and
    /// skipped, never returned.
    #[instrument(level = "info", skip_all, fields(source = %site.name))]
    pub async fn collect_site(&self, site: &Site, language: Language) -> SiteReport {
        let target = self.config.target_per_site;
        info!(goal = target, base_url = %site.base_url, "Scraping site");
        let mut crawl = SiteCrawl::new(site, language, target);

        for category in &self.config.categories {
            if crawl.done() {
                break;
            }
            for listing in self.config.category_urls(site.base(), category) {
                match self.fetcher.fetch(&listing).await {
                    Ok(html) => {
                        let accepted = self.harvest(&mut crawl, &listing, &html).await;
                        debug!(%category, %listing, accepted, "Category listing harvested");
                        break;
                    }
                    Err(e) => debug!(%category, %listing, error = %e, "Category listing unavailable"),
                }
            }
        }

        if !crawl.done() {
            debug!(
                collected = crawl.report.articles.len(),
                goal = target,
                "Category sweep fell short; paging through listings"
            );
            'roots: for root in self.config.pagination_roots(site.base()) {
                for page in 1..=self.config.max_pages {
                    if crawl.done() {
                        break 'roots;
                    }
                    let listing = page_url(&root, page);
                    let accepted = match self.fetcher.fetch(&listing).await {
                        Ok(html) => self.harvest(&mut crawl, &listing, &html).await,
                        Err(e) => {
                            debug!(%listing, error = %e, "Listing page unavailable");
                            0
                        }
                    };
                    if accepted == 0 {
                        debug!(%root, page, "No new articles; abandoning listing");
                        break;
                    }
                }
            }
        }

        let report = crawl.report;
        info!(
            collected = report.articles.len(),
            goal = target,
            candidates = report.candidates,
            fetch_failures = report.fetch_failures,
            rejections = report.rejections,
            listings = report.listings,
            "Completed site"
        );
        report
    }

    /// Follow the article links of one listing page. Returns how many new
    /// articles were accepted.
    async fn harvest(&self, crawl: &mut SiteCrawl<'_>, listing: &str, html: &str) -> usize {
        let Ok(listing_url) = Url::parse(listing) else {
            warn!(%listing, "Listing URL does not parse; skipping");
            return 0;
        };
        crawl.report.listings += 1;

        let mut accepted = 0;
        for link in listing_links(html, &listing_url) {
            if crawl.done() {
                break;
            }
            if !crawl.claim(&link) {
                continue;
            }
            crawl.report.candidates += 1;
            match scrape_article(&self.fetcher, link.as_str(), crawl.language, &crawl.site.name).await {
                Ok(article) => {
                    debug!(
                        title = %truncate_for_log(&article.title, 60),
                        collected = crawl.report.articles.len() + 1,
                        goal = crawl.target,
                        "Accepted article"
                    );
                    crawl.report.articles.push(article);
                    accepted += 1;
                    self.config.throttle.pause().await;
                }
                Err(CandidateError::Fetch(e)) => {
                    crawl.report.fetch_failures += 1;
                    debug!(url = %link, error = %e, "Article fetch failed");
                }
                Err(CandidateError::Rejected(reason)) => {
                    crawl.report.rejections += 1;
                    debug!(url = %link, %reason, "Page rejected");
                }
            }
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Throttle, UrlTemplate};
    use crate::error::FetchError;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const BASE: &str = "https://example.com";

    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, html: String) -> Self {
            self.pages.insert(url.to_string(), html);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(StatusCode::NOT_FOUND))
        }
    }

    fn article_html(n: usize) -> String {
        let para = vec!["reporting"; 35].join(" ");
        format!("<html><body><h1>Headline number {n} today</h1><div class=\"story\"><p>{para}</p></div></body></html>")
    }

    fn listing_html(links: &[String]) -> String {
        let anchors: String = links.iter().map(|l| format!("<a href=\"{l}\">x</a>")).collect();
        format!("<html><body>{anchors}</body></html>")
    }

    fn story(n: usize) -> String {
        format!("{BASE}/news/story-{n}")
    }

    fn config(target: usize, categories: &[&str]) -> CrawlConfig {
        CrawlConfig {
            target_per_site: target,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            throttle: Throttle::NONE,
            ..CrawlConfig::default()
        }
    }

    fn site() -> Site {
        Site::new("Example", BASE)
    }

    #[tokio::test]
    async fn test_stops_at_target() {
        let links: Vec<String> = (0..10).map(story).collect();
        let mut fetcher = FakeFetcher::default().with(&format!("{BASE}/bangladesh"), listing_html(&links));
        for (i, link) in links.iter().enumerate() {
            fetcher = fetcher.with(link, article_html(i));
        }
        let collector = Collector::new(fetcher, config(5, &["bangladesh", "sports"]));

        let report = collector.collect_site(&site(), Language::En).await;

        assert_eq!(report.articles.len(), 5);
        assert_eq!(report.articles[4].url, story(4));
        let requested = collector.fetcher.requested();
        let article_fetches = requested.iter().filter(|u| u.contains("/news/story-")).count();
        assert_eq!(article_fetches, 5);
        assert!(!requested.iter().any(|u| u.contains("?page=")));
        assert!(!requested.iter().any(|u| u.ends_with("/sports")));
    }

    #[tokio::test]
    async fn test_first_working_listing_shape_wins() {
        let fetcher = FakeFetcher::default()
            .with(&format!("{BASE}/category/politics"), listing_html(&[story(1)]))
            .with(&format!("{BASE}/politics/news"), listing_html(&[story(2)]))
            .with(&story(1), article_html(1))
            .with(&story(2), article_html(2));
        let mut cfg = config(10, &["politics"]);
        cfg.pagination_templates.clear();
        let collector = Collector::new(fetcher, cfg);

        let report = collector.collect_site(&site(), Language::En).await;

        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.articles[0].url, story(1));
        let requested = collector.fetcher.requested();
        assert_eq!(&requested[..2], &[format!("{BASE}/politics"), format!("{BASE}/category/politics")]);
        assert!(!requested.contains(&format!("{BASE}/politics/news")));
    }

    #[tokio::test]
    async fn test_filters_and_counts_failures() {
        let links = vec![
            story(1),
            story(1),
            format!("{BASE}/tag/cricket"),
            format!("{BASE}/about-us"),
            "https://elsewhere.com/news/story-9".to_string(),
            story(2),
            story(3),
        ];
        let short = "<html><body><h1>Tiny</h1></body></html>".to_string();
        let fetcher = FakeFetcher::default()
            .with(&format!("{BASE}/world"), listing_html(&links))
            .with(&story(1), article_html(1))
            .with(&story(2), short);
        let mut cfg = config(10, &["world"]);
        cfg.pagination_templates.clear();
        let collector = Collector::new(fetcher, cfg);

        let report = collector.collect_site(&site(), Language::En).await;

        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.candidates, 3);
        assert_eq!(report.rejections, 1);
        assert_eq!(report.fetch_failures, 1);
        assert_eq!(report.listings, 1);
        let requested = collector.fetcher.requested();
        assert_eq!(requested.iter().filter(|u| **u == story(1)).count(), 1);
        assert!(!requested.iter().any(|u| u.contains("elsewhere.com") || u.contains("/tag/")));
    }

    #[tokio::test]
    async fn test_pagination_abandons_dry_listing() {
        let page1 = listing_html(&[story(1), story(2)]);
        let fetcher = FakeFetcher::default()
            .with(&format!("{BASE}/latest?page=1"), page1.clone())
            .with(&format!("{BASE}/latest?page=2"), page1)
            .with(&format!("{BASE}/latest?page=3"), listing_html(&[story(3)]))
            .with(&format!("{BASE}/archive?page=1"), listing_html(&[story(3)]))
            .with(&story(1), article_html(1))
            .with(&story(2), article_html(2))
            .with(&story(3), article_html(3));
        let mut cfg = config(10, &[]);
        cfg.pagination_templates = vec![UrlTemplate::new("{base}/latest"), UrlTemplate::new("{base}/archive")];
        let collector = Collector::new(fetcher, cfg);

        let report = collector.collect_site(&site(), Language::En).await;

        let urls: Vec<&str> = report.articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec![story(1), story(2), story(3)]);
        let requested = collector.fetcher.requested();
        assert!(!requested.contains(&format!("{BASE}/latest?page=3")));
        assert!(requested.contains(&format!("{BASE}/archive?page=2")));
        assert!(!requested.contains(&format!("{BASE}/archive?page=3")));
    }

    #[tokio::test]
    async fn test_pagination_respects_max_pages() {
        let mut fetcher = FakeFetcher::default();
        for page in 1..=5 {
            fetcher = fetcher
                .with(&format!("{BASE}/latest?page={page}"), listing_html(&[story(page)]))
                .with(&story(page), article_html(page));
        }
        let mut cfg = config(100, &[]);
        cfg.max_pages = 3;
        cfg.pagination_templates = vec![UrlTemplate::new("{base}/latest")];
        let collector = Collector::new(fetcher, cfg);

        let report = collector.collect_site(&site(), Language::En).await;

        assert_eq!(report.articles.len(), 3);
        assert!(!collector.fetcher.requested().contains(&format!("{BASE}/latest?page=4")));
    }

    #[tokio::test]
    async fn test_exhaustion_returns_partial_results() {
        let fetcher = FakeFetcher::default();
        let collector = Collector::new(fetcher, config(5, &["sports"]));

        let report = collector.collect_site(&site(), Language::Bn).await;

        assert!(report.articles.is_empty());
        assert_eq!(report.listings, 0);
        // Three category shapes, then page 1 of each pagination template.
        assert_eq!(collector.fetcher.requested().len(), 3 + 5);
    }

    #[tokio::test]
    async fn test_collect_group_appends_and_checkpoints() {
        let other = "https://other.example.org";
        let fetcher = FakeFetcher::default()
            .with(&format!("{BASE}/national"), listing_html(&[story(1)]))
            .with(&story(1), article_html(1))
            .with(&format!("{other}/national"), listing_html(&[format!("{other}/article/a")]))
            .with(&format!("{other}/article/a"), article_html(2));
        let mut cfg = config(1, &["national"]);
        cfg.pagination_templates.clear();
        let collector = Collector::new(fetcher, cfg);
        let group = SiteGroup {
            language: Language::Bn,
            sites: vec![site(), Site::new("Other", other)],
        };
        let dir = std::env::temp_dir().join(format!("clir_news_scraper_collect_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let articles = collector.collect_group(&group, Some(&dir)).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "Example");
        assert_eq!(articles[1].source, "Other");
        assert!(articles.iter().all(|a| a.language == Language::Bn));
        let saved = std::fs::read_to_string(dir.join("bangla_articles_temp.json")).unwrap();
        let saved: Vec<Article> = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, articles);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
