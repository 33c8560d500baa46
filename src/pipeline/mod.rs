//! Filter, sort and paginate content collections.
//!
//! Every listing in the site goes through [`query`]: a pure function over a
//! slice of items that never mutates its input. Stages run in a fixed order
//! (text, tags, category/language/level/type, featured, sort, slice) and the
//! pagination numbers are computed from the count before slicing.

mod items;
mod slug;

pub use slug::slugify;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Level, ResourceType};

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Read-only view of anything that can be listed, filtered and sorted.
pub trait ContentItem {
    fn id(&self) -> &str;
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    /// Short summary shown in listings (article excerpt, resource description).
    fn excerpt(&self) -> &str;
    fn tags(&self) -> &[String];
    fn category(&self) -> Option<&str> {
        None
    }
    fn language(&self) -> &str;
    fn level(&self) -> Option<Level> {
        None
    }
    fn resource_type(&self) -> Option<ResourceType> {
        None
    }
    fn featured(&self) -> bool;
    fn published_at(&self) -> DateTime<Utc>;
    /// Reading time in minutes for articles, file size in bytes for resources.
    fn metric(&self) -> u64;
}

/// Optional constraints narrowing a collection.
///
/// `None` (or an empty `tags` list) means the dimension is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Item matches when it carries any of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl FilterSpec {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// The free-text query, trimmed; `None` when blank.
    pub fn text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Whether `item` satisfies every constraint of this filter.
    pub fn matches<T: ContentItem + ?Sized>(&self, item: &T) -> bool {
        if let Some(text) = self.text() {
            if !matches_text(item, &text.to_lowercase()) {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|tag| item.tags().contains(tag)) {
            return false;
        }

        if let Some(category) = &self.category {
            if item.category() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(language) = &self.language {
            if item.language() != language {
                return false;
            }
        }

        if self.level.is_some() && item.level() != self.level {
            return false;
        }

        if self.resource_type.is_some() && item.resource_type() != self.resource_type {
            return false;
        }

        match self.featured {
            Some(featured) => item.featured() == featured,
            None => true,
        }
    }
}

/// Case-insensitive substring match against title, excerpt and tags.
///
/// `needle` must already be lowercased.
pub fn matches_text<T: ContentItem + ?Sized>(item: &T, needle: &str) -> bool {
    item.title().to_lowercase().contains(needle)
        || item.excerpt().to_lowercase().contains(needle)
        || item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    /// Shortest (or smallest) first.
    ReadingTime,
    /// Featured first, then by reading time. There is no view-count signal yet.
    Popular,
}

impl SortKey {
    fn compare<T: ContentItem + ?Sized>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::Recent => b.published_at().cmp(&a.published_at()),
            SortKey::ReadingTime => a.metric().cmp(&b.metric()),
            SortKey::Popular => b
                .featured()
                .cmp(&a.featured())
                .then_with(|| a.metric().cmp(&b.metric())),
        }
    }
}

/// Pagination metadata for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    /// Build pagination numbers; `page` and `limit` are clamped to at least 1.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit).max(1),
            has_next: page.saturating_mul(limit) < total,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of items plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

/// Filter, sort and paginate `items`.
///
/// `page < 1` and `limit < 1` are clamped to 1. A page past the end yields an
/// empty `data` with the real `total`.
pub fn query<T>(items: &[T], filter: &FilterSpec, sort: SortKey, page: usize, limit: usize) -> Page<T>
where
    T: ContentItem + Clone,
{
    let mut matched: Vec<&T> = items.iter().filter(|item| filter.matches(*item)).collect();

    // Vec::sort_by is stable, so ties keep collection order.
    matched.sort_by(|a, b| sort.compare(*a, *b));

    let pagination = PaginationInfo::new(page, limit, matched.len());
    let data = matched
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit)
        .cloned()
        .collect();

    Page { data, pagination }
}
