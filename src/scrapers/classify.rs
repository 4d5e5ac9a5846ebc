//! URL heuristics: is a discovered link plausibly an article page?

use url::Url;

/// Substrings that mark listing, feed, auth or asset URLs.
pub const EXCLUDE_PATTERNS: &[&str] = &[
    "/tag/",
    "/category/",
    "/author/",
    "/page/",
    "/feed/",
    "/rss/",
    "/search/",
    "/login/",
    ".jpg",
    ".png",
    ".pdf",
    "/static/",
    "/assets/",
];

/// Topical path segments that article URLs usually carry.
pub const INCLUDE_PATTERNS: &[&str] = &[
    "/bangladesh/",
    "/national/",
    "/politics/",
    "/sports/",
    "/business/",
    "/world/",
    "/entertainment/",
    "/technology/",
    "/news/",
    "/story/",
    "/article/",
    "/post/",
    "/detail/",
    "/opinion/",
    "/feature/",
];

/// Classify a URL as a likely article.
///
/// Exclusions win: a URL carrying any exclusion marker is rejected even if
/// it also carries an inclusion segment.
pub fn is_article(url: &str) -> bool {
    let url = url.to_lowercase();
    if EXCLUDE_PATTERNS.iter().any(|p| url.contains(p)) {
        return false;
    }
    INCLUDE_PATTERNS.iter().any(|p| url.contains(p))
}

/// Host with a leading `www.` removed.
pub fn site_host(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
}

/// Whether `link` lives on the site whose bare host is `host`.
pub fn same_site(link: &Url, host: &str) -> bool {
    site_host(link).is_some_and(|h| h == host)
}
