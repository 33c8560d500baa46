//! Content repositories.
//!
//! [`ContentRepository`] is the async contract the HTTP layer and the client
//! sessions depend on. [`MockRepository`] serves a fixed in-memory collection
//! through the filter pipeline with an artificial delay, standing in for a
//! real backend behind the same interface.

mod categories;
pub mod fixtures;
mod search;

pub use categories::*;
pub use search::*;

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Article, LibraryItem};
use crate::pipeline::{self, ContentItem, FilterSpec, Page, SortKey};

/// Async access to a listable content collection.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    type Item: ContentItem + Clone + Send + Sync + 'static;

    /// One filtered, sorted page of items.
    async fn list(
        &self,
        filter: &FilterSpec,
        sort: SortKey,
        page: usize,
        limit: usize,
    ) -> Result<Page<Self::Item>, AppError>;

    /// Look up an item by slug. A missing slug is `Ok(None)`, not an error.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Self::Item>, AppError>;
}

/// Distinct filter values present in a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub tags: Vec<String>,
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<String>,
}

/// Repository over a static collection with simulated latency.
pub struct MockRepository<T: 'static> {
    items: &'static [T],
    latency: Duration,
}

pub type ArticleRepository = MockRepository<Article>;
pub type LibraryRepository = MockRepository<LibraryItem>;

impl ArticleRepository {
    pub fn articles(latency: Duration) -> Self {
        Self::new(fixtures::articles(), latency)
    }
}

impl LibraryRepository {
    pub fn library(latency: Duration) -> Self {
        Self::new(fixtures::library(), latency)
    }
}

impl<T> MockRepository<T>
where
    T: ContentItem + Clone + Send + Sync + 'static,
{
    pub fn new(items: &'static [T], latency: Duration) -> Self {
        Self { items, latency }
    }

    /// Featured items in collection order.
    pub async fn featured(&self, limit: usize) -> Vec<T> {
        self.simulate_latency().await;
        self.items
            .iter()
            .filter(|item| item.featured())
            .take(limit)
            .cloned()
            .collect()
    }

    /// Distinct, sorted filter values.
    pub async fn facets(&self) -> Facets {
        self.simulate_latency().await;

        let mut tags = BTreeSet::new();
        let mut languages = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut types = BTreeSet::new();
        let mut levels = BTreeSet::new();

        for item in self.items {
            tags.extend(item.tags().iter().cloned());
            languages.insert(item.language().to_string());
            if let Some(category) = item.category() {
                categories.insert(category.to_string());
            }
            if let Some(resource_type) = item.resource_type() {
                types.insert(resource_type);
            }
            if let Some(level) = item.level() {
                levels.insert(level);
            }
        }

        Facets {
            tags: tags.into_iter().collect(),
            languages: languages.into_iter().collect(),
            categories: categories.into_iter().collect(),
            types: types.iter().map(|t| t.as_str().to_string()).collect(),
            levels: levels.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl<T> ContentRepository for MockRepository<T>
where
    T: ContentItem + Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn list(
        &self,
        filter: &FilterSpec,
        sort: SortKey,
        page: usize,
        limit: usize,
    ) -> Result<Page<T>, AppError> {
        self.simulate_latency().await;
        let result = pipeline::query(self.items, filter, sort, page, limit);
        tracing::debug!(
            "Listed {} of {} items (page {})",
            result.data.len(),
            result.pagination.total,
            result.pagination.page
        );
        Ok(result)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<T>, AppError> {
        self.simulate_latency().await;
        Ok(self.items.iter().find(|item| item.slug() == slug).cloned())
    }
}
