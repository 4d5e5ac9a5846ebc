//! Generic HTML-to-article extraction.
//!
//! One heuristic serves every site:
//!
//! 1. **Title**: text of the first `<h1>`, or of the first `<h2>` when the
//!    page has no `<h1>`. Shorter than 10 characters after trimming: rejected.
//! 2. **Body**: the first `<article>`, `<div>` or `<section>` (tried in that
//!    order) whose `class` mentions story/content/article/body/text/detail
//!    supplies its `<p>` texts longer than 50 characters. If no container
//!    yields any, every `<p>` on the page longer than 50 characters is used.
//!    Paragraphs are joined with a single space.
//! 3. **Quality gate**: the body needs at least 200 characters and 30 words.
//! 4. **Date**: the first `datetime` attribute on a `time`/`span`/`div`, else
//!    the first such element whose short text names a month as a whole word,
//!    else capture time.

use crate::error::Rejection;
use crate::models::{Article, Language};
use crate::utils::{char_len, collapse_whitespace, word_count};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

pub const MIN_TITLE_CHARS: usize = 10;
pub const MIN_PARAGRAPH_CHARS: usize = 50;
pub const MIN_BODY_CHARS: usize = 200;
pub const MIN_BODY_WORDS: usize = 30;
/// Elements with more text than this are page wrappers, not date lines.
pub const MAX_DATE_TEXT_CHARS: usize = 100;

const BODY_CLASS_KEYWORDS: &[&str] = &["story", "content", "article", "body", "text", "detail"];

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DATE_CANDIDATES: Lazy<Selector> = Lazy::new(|| Selector::parse("time, span, div").unwrap());
static CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article[class]", "div[class]", "section[class]"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});
static MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\b",
    )
    .unwrap()
});

/// Build an [`Article`] from a fetched page, stamping capture time when no
/// date is found.
#[instrument(level = "debug", skip(html), fields(bytes = html.len()))]
pub fn extract(html: &str, language: Language, source: &str, url: &str) -> Result<Article, Rejection> {
    extract_with_fallback_date(html, language, source, url, || Local::now().to_rfc3339())
}

/// As [`extract`], with the fallback date supplied by the caller.
pub fn extract_with_fallback_date(
    html: &str,
    language: Language,
    source: &str,
    url: &str,
    captured_at: impl FnOnce() -> String,
) -> Result<Article, Rejection> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;

    let body = extract_body(&document);
    let chars = char_len(&body);
    let words = word_count(&body);
    if chars < MIN_BODY_CHARS || words < MIN_BODY_WORDS {
        return Err(Rejection::BodyTooShort { chars, words });
    }

    let date = extract_date(&document).unwrap_or_else(captured_at);
    debug!(%title, words, %date, "Extracted article");

    Ok(Article::new(
        title,
        body,
        url.to_string(),
        date,
        language,
        source.to_string(),
    ))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// First `<h1>`, else first `<h2>`; the first heading found is final.
pub fn extract_title(document: &Html) -> Result<String, Rejection> {
    let heading = document
        .select(&H1)
        .next()
        .or_else(|| document.select(&H2).next())
        .ok_or(Rejection::MissingTitle)?;
    let title = element_text(heading).trim().to_string();
    let chars = char_len(&title);
    if chars < MIN_TITLE_CHARS {
        return Err(Rejection::TitleTooShort { chars });
    }
    Ok(title)
}

fn long_paragraphs(root: ElementRef<'_>) -> Vec<String> {
    root.select(&P)
        .map(|p| element_text(p).trim().to_string())
        .filter(|t| char_len(t) > MIN_PARAGRAPH_CHARS)
        .collect()
}

fn looks_like_body(element: &ElementRef<'_>) -> bool {
    element.value().attr("class").is_some_and(|class| {
        let class = class.to_lowercase();
        BODY_CLASS_KEYWORDS.iter().any(|k| class.contains(k))
    })
}

/// Paragraphs of the first body-like container, or of the whole page.
pub fn body_paragraphs(document: &Html) -> Vec<String> {
    for selector in CONTAINERS.iter() {
        if let Some(container) = document.select(selector).find(looks_like_body) {
            let paragraphs = long_paragraphs(container);
            if !paragraphs.is_empty() {
                return paragraphs;
            }
        }
    }
    long_paragraphs(document.root_element())
}

pub fn extract_body(document: &Html) -> String {
    body_paragraphs(document).join(" ")
}

/// Best-effort publication date; `None` when the page shows none.
pub fn extract_date(document: &Html) -> Option<String> {
    let machine = document.select(&DATE_CANDIDATES).find_map(|el| {
        el.value()
            .attr("datetime")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    });
    machine.or_else(|| {
        document
            .select(&DATE_CANDIDATES)
            .map(|el| collapse_whitespace(&element_text(el)))
            .find(|text| char_len(text) <= MAX_DATE_TEXT_CHARS && MONTH.is_match(text))
    })
}

/// Absolute http(s) links on a listing page, in document order, without
/// fragments. Relative links resolve against `page_url`.
pub fn listing_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| page_url.join(href.trim()).ok())
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|mut u| {
            u.set_fragment(None);
            u
        })
        .collect()
}
