//! Data models for collected articles.
//!
//! [`Article`] is the only entity written to disk. Its JSON field order and
//! names are the interchange format consumed by the downstream indexer:
//!
//! ```json
//! {
//!   "title": "...",
//!   "body": "...",
//!   "url": "https://...",
//!   "date": "2025-05-06T10:00:00+06:00",
//!   "language": "bn",
//!   "source": "Prothom Alo",
//!   "word_count": 412,
//!   "tokens": 412
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag of a collected article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bn,
    En,
}

impl Language {
    /// Short tag stored on every article (`bn` / `en`).
    pub fn tag(self) -> &'static str {
        match self {
            Language::Bn => "bn",
            Language::En => "en",
        }
    }

    /// Name used for per-language output files (`bangla_articles.json`).
    pub fn group_name(self) -> &'static str {
        match self {
            Language::Bn => "bangla",
            Language::En => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One extracted news article.
///
/// Built only by the extractor once the title and body have passed the
/// quality gate; the collection loop appends it and never mutates it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// Headline text, at least 10 characters.
    pub title: String,
    /// Paragraph texts joined by single spaces.
    pub body: String,
    /// The URL the page was fetched from.
    pub url: String,
    /// Publication timestamp as found on the page, or capture time.
    pub date: String,
    pub language: Language,
    /// Registry name of the site, e.g. "The Daily Star".
    pub source: String,
    /// Whitespace-separated token count of `body`.
    pub word_count: usize,
    /// Same value as `word_count`; kept for the dataset schema.
    pub tokens: usize,
}

impl Article {
    pub fn new(
        title: String,
        body: String,
        url: String,
        date: String,
        language: Language,
        source: String,
    ) -> Self {
        let word_count = crate::utils::word_count(&body);
        Self {
            title,
            body,
            url,
            date,
            language,
            source,
            word_count,
            tokens: word_count,
        }
    }
}
