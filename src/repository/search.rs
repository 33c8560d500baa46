//! Site-wide search across articles and library resources.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use super::fixtures;
use crate::models::{Article, LibraryItem, SearchKind, SearchResult};
use crate::pipeline::{matches_text, ContentItem};

/// Shown by [`SearchRepository::related`] when nothing co-occurs with the query.
const DEFAULT_RELATED: [&str; 5] = [
    "JavaScript",
    "Web Development",
    "Programming",
    "Tutorial",
    "Guide",
];

/// Curated queries surfaced before the user types anything.
const TRENDING: [&str; 10] = [
    "React Hooks",
    "TypeScript",
    "Node.js",
    "CSS Grid",
    "Python",
    "JavaScript",
    "Vue.js",
    "Angular",
    "Express.js",
    "MongoDB",
];

/// Suggestions are only offered once the query has this many characters.
const MIN_SUGGESTION_CHARS: usize = 2;

/// Search over both content collections.
pub struct SearchRepository {
    articles: &'static [Article],
    library: &'static [LibraryItem],
    latency: Duration,
}

impl SearchRepository {
    pub fn new(latency: Duration) -> Self {
        Self {
            articles: fixtures::articles(),
            library: fixtures::library(),
            latency,
        }
    }

    /// Articles then resources whose title, excerpt or tags contain `query`.
    ///
    /// A blank query returns the first `limit` entries unfiltered.
    pub async fn global_search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.simulate_latency().await;

        let needle = query.trim().to_lowercase();
        let articles = self
            .articles
            .iter()
            .filter(|a| needle.is_empty() || matches_text(*a, &needle))
            .map(|a| hit(a, SearchKind::Article));
        let library = self
            .library
            .iter()
            .filter(|i| needle.is_empty() || matches_text(*i, &needle))
            .map(|i| hit(i, SearchKind::Library));

        articles.chain(library).take(limit).collect()
    }

    /// Distinct titles and tags containing `query`, titles first.
    pub async fn suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_SUGGESTION_CHARS {
            return Vec::new();
        }
        self.simulate_latency().await;

        let mut seen = BTreeSet::new();
        let titles = self
            .articles
            .iter()
            .map(|a| a.title.as_str())
            .chain(self.library.iter().map(|i| i.title.as_str()));
        let tags = self.all_tags();

        titles
            .chain(tags)
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .filter(|candidate| seen.insert(candidate.to_lowercase()))
            .take(limit)
            .map(str::to_string)
            .collect()
    }

    /// Trending queries, most popular first.
    pub async fn trending(&self, limit: usize) -> Vec<String> {
        self.simulate_latency().await;
        TRENDING.iter().take(limit).map(|s| s.to_string()).collect()
    }

    /// Tags ordered by how many items carry them, then by name.
    pub async fn popular_tags(&self, limit: usize) -> Vec<String> {
        self.simulate_latency().await;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tag in self.all_tags() {
            *counts.entry(tag).or_default() += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        // BTreeMap already yields names in order; the stable sort keeps it for ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(tag, _)| tag.to_string())
            .collect()
    }

    /// Tags that co-occur on items matching `query`, most frequent first.
    pub async fn related(&self, query: &str, limit: usize) -> Vec<String> {
        self.simulate_latency().await;

        let needle = query.trim().to_lowercase();
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        if !needle.is_empty() {
            let article_tags = self
                .articles
                .iter()
                .filter(|a| matches_text(*a, &needle))
                .flat_map(|a| a.tags.iter());
            let library_tags = self
                .library
                .iter()
                .filter(|i| matches_text(*i, &needle))
                .flat_map(|i| i.tags.iter());

            for tag in article_tags.chain(library_tags) {
                if tag.to_lowercase() != needle {
                    *counts.entry(tag.as_str()).or_default() += 1;
                }
            }
        }

        if counts.is_empty() {
            return DEFAULT_RELATED
                .iter()
                .take(limit)
                .map(|s| s.to_string())
                .collect();
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(tag, _)| tag.to_string())
            .collect()
    }

    fn all_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.articles
            .iter()
            .flat_map(|a| a.tags.iter())
            .chain(self.library.iter().flat_map(|i| i.tags.iter()))
            .map(String::as_str)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn hit<T: ContentItem>(item: &T, kind: SearchKind) -> SearchResult {
    SearchResult {
        id: item.id().to_string(),
        title: item.title().to_string(),
        kind,
        excerpt: item.excerpt().to_string(),
        tags: item.tags().to_vec(),
        slug: item.slug().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> SearchRepository {
        SearchRepository::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_global_search_spans_both_collections() {
        let results = repo().global_search("python", 10).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].kind, SearchKind::Article);
        assert_eq!(results[1].kind, SearchKind::Library);
        assert_eq!(results[1].slug, "python-data-science-toolkit");
    }

    #[tokio::test]
    async fn test_blank_search_returns_first_entries() {
        let results = repo().global_search("   ", 3).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "1");
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let results = repo().global_search("javascript", 2).await;
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_trending_is_truncated_in_order() {
        assert_eq!(repo().trending(3).await, vec!["React Hooks", "TypeScript", "Node.js"]);
        assert_eq!(repo().trending(50).await.len(), 10);
    }

    #[tokio::test]
    async fn test_suggestions_need_two_chars() {
        assert!(repo().suggestions("r", 5).await.is_empty());

        let suggestions = repo().suggestions("re", 10).await;
        assert!(suggestions.contains(&"React Hooks: A Complete Guide".to_string()));
        assert!(suggestions.contains(&"React".to_string()));
        // "React" appears on several items but is suggested once.
        assert_eq!(suggestions.iter().filter(|s| *s == "React").count(), 1);
    }

    #[tokio::test]
    async fn test_popular_tags_ranked_by_frequency() {
        let tags = repo().popular_tags(2).await;
        assert_eq!(tags[0], "JavaScript");
        assert_eq!(tags.len(), 2);
    }

    #[tokio::test]
    async fn test_related_excludes_query_and_falls_back() {
        let related = repo().related("css", 5).await;
        assert!(!related.iter().any(|t| t.eq_ignore_ascii_case("css")));
        assert!(related.contains(&"Grid".to_string()));

        let fallback = repo().related("zzz-nothing", 3).await;
        assert_eq!(fallback, vec!["JavaScript", "Web Development", "Programming"]);
    }
}
