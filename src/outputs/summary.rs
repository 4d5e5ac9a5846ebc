//! End-of-run collection summary.

use crate::models::{Article, Language};
use crate::sites::SiteGroup;
use itertools::Itertools;
use tracing::info;

/// Statistics for one language group.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSummary {
    pub language: Language,
    pub total: usize,
    pub target: usize,
    pub average_words: f64,
    /// Article count per source, in registry order.
    pub per_source: Vec<(String, usize)>,
}

impl LanguageSummary {
    pub fn achieved(&self) -> bool {
        self.total >= self.target
    }

    pub fn grade(&self) -> &'static str {
        if self.achieved() { "ACHIEVED" } else { "PARTIAL" }
    }
}

/// Summarise `articles` collected for `group` against a per-language target.
///
/// Sources appear in registry order; a source that produced nothing is listed
/// with zero, and any source outside the registry is appended at the end.
pub fn summarize(group: &SiteGroup, articles: &[Article], target: usize) -> LanguageSummary {
    let counts = articles.iter().map(|a| a.source.as_str()).counts();
    let mut per_source: Vec<(String, usize)> = group
        .sites
        .iter()
        .map(|s| (s.name.clone(), counts.get(s.name.as_str()).copied().unwrap_or(0)))
        .collect();
    let extra = counts
        .iter()
        .filter(|(name, _)| !group.sites.iter().any(|s| s.name == **name))
        .sorted()
        .map(|(name, n)| (name.to_string(), *n))
        .collect::<Vec<_>>();
    per_source.extend(extra);

    let average_words = if articles.is_empty() {
        0.0
    } else {
        articles.iter().map(|a| a.word_count).sum::<usize>() as f64 / articles.len() as f64
    };

    LanguageSummary {
        language: group.language,
        total: articles.len(),
        target,
        average_words,
        per_source,
    }
}

/// Log the summary for every language group.
pub fn report(summaries: &[LanguageSummary]) {
    let total: usize = summaries.iter().map(|s| s.total).sum();
    info!(total, "Collection summary");
    for s in summaries {
        info!(
            language = %s.language,
            collected = s.total,
            goal = s.target,
            status = s.grade(),
            average_words = %format!("{:.0}", s.average_words),
            "Language result"
        );
        for (source, count) in &s.per_source {
            info!(language = %s.language, %source, articles = *count, "Source result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::Site;

    fn article(source: &str, words: usize) -> Article {
        Article::new(
            "A long enough title".to_string(),
            vec!["word"; words].join(" "),
            format!("https://example.com/news/{source}/{words}"),
            "2025-05-06".to_string(),
            Language::En,
            source.to_string(),
        )
    }

    fn group() -> SiteGroup {
        SiteGroup {
            language: Language::En,
            sites: vec![Site::new("Alpha", "https://alpha.com"), Site::new("Beta", "https://beta.com")],
        }
    }

    #[test]
    fn test_summary_counts_in_registry_order() {
        let articles = vec![article("Beta", 40), article("Alpha", 30), article("Beta", 50)];
        let summary = summarize(&group(), &articles, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.per_source,
            vec![("Alpha".to_string(), 1), ("Beta".to_string(), 2)]
        );
        assert_eq!(summary.average_words, 40.0);
        assert!(summary.achieved());
        assert_eq!(summary.grade(), "ACHIEVED");
    }

    #[test]
    fn test_summary_partial_and_empty() {
        let summary = summarize(&group(), &[], 2600);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_words, 0.0);
        assert_eq!(summary.grade(), "PARTIAL");
        assert_eq!(
            summary.per_source,
            vec![("Alpha".to_string(), 0), ("Beta".to_string(), 0)]
        );
    }

    #[test]
    fn test_unregistered_source_appended() {
        let summary = summarize(&group(), &[article("Gamma", 30)], 1);
        assert_eq!(summary.per_source.last().unwrap(), &("Gamma".to_string(), 1));
    }
}
