//! Compiled-in registry of news sites, grouped by language.
//!
//! | Group | Source | Base URL |
//! |-------|--------|----------|
//! | Bangla | Prothom Alo | <https://www.prothomalo.com> |
//! | Bangla | BD News 24 | <https://bangla.bdnews24.com> |
//! | Bangla | Kaler Kantho | <https://www.kalerkantho.com> |
//! | Bangla | Bangla Tribune | <https://www.banglatribune.com> |
//! | Bangla | Dhaka Post | <https://www.dhakapost.com> |
//! | English | The Daily Star | <https://www.thedailystar.net> |
//! | English | Dhaka Tribune | <https://www.dhakatribune.com> |
//! | English | New Age | <https://www.newagebd.net> |
//! | English | Daily Sun | <https://www.daily-sun.com> |
//! | English | The Business Standard | <https://www.tbsnews.net> |

use crate::models::Language;
use serde::{Deserialize, Serialize};

/// A single news site: display name plus the root URL crawling starts from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Site {
    pub name: String,
    pub base_url: String,
}

impl Site {
    pub fn new(name: &str, base_url: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Base URL without a trailing slash, ready for template substitution.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// All sites collected for one language, in crawl order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteGroup {
    pub language: Language,
    pub sites: Vec<Site>,
}

/// Site lists as they appear in the YAML config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Registry {
    pub bangla: Vec<Site>,
    pub english: Vec<Site>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            bangla: vec![
                Site::new("Prothom Alo", "https://www.prothomalo.com"),
                Site::new("BD News 24", "https://bangla.bdnews24.com"),
                Site::new("Kaler Kantho", "https://www.kalerkantho.com"),
                Site::new("Bangla Tribune", "https://www.banglatribune.com"),
                Site::new("Dhaka Post", "https://www.dhakapost.com"),
            ],
            english: vec![
                Site::new("The Daily Star", "https://www.thedailystar.net"),
                Site::new("Dhaka Tribune", "https://www.dhakatribune.com"),
                Site::new("New Age", "https://www.newagebd.net"),
                Site::new("Daily Sun", "https://www.daily-sun.com"),
                Site::new("The Business Standard", "https://www.tbsnews.net"),
            ],
        }
    }
}

impl Registry {
    /// Language groups in collection order: Bangla first, then English.
    pub fn groups(&self) -> Vec<SiteGroup> {
        vec![
            SiteGroup {
                language: Language::Bn,
                sites: self.bangla.clone(),
            },
            SiteGroup {
                language: Language::En,
                sites: self.english.clone(),
            },
        ]
    }
}
