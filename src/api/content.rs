//! Query parameters and handlers shared by the article and library endpoints.

use serde::{Deserialize, Serialize};

use super::{paginated, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Level, ResourceType};
use crate::pipeline::{ContentItem, FilterSpec, SortKey, MAX_PAGE_SIZE};
use crate::repository::{ContentRepository, Facets, MockRepository};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of featured items returned by default.
const DEFAULT_FEATURED_LIMIT: usize = 5;

/// Listing query parameters.
///
/// `page` and `limit` are signed so that `0` or negative values are clamped
/// rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    /// Comma separated; an item matches if it has any of them.
    pub tags: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub level: Option<Level>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    pub featured: Option<bool>,
    pub sort: Option<SortKey>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn filter(&self) -> FilterSpec {
        let tags = self
            .tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        FilterSpec {
            query: self.q.clone(),
            tags,
            category: non_empty(&self.category),
            language: non_empty(&self.language),
            level: self.level,
            resource_type: self.resource_type,
            featured: self.featured,
        }
    }

    pub fn sort(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }

    /// Requested page, at least 1.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1) as usize
    }

    /// Requested page size, between 1 and [`MAX_PAGE_SIZE`].
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as usize
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `?limit=` for the featured endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<usize>,
}

impl FeaturedParams {
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_FEATURED_LIMIT)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

pub(crate) async fn list_content<R>(repo: &R, params: &ListParams) -> ApiResult<Vec<R::Item>>
where
    R: ContentRepository + ?Sized,
    R::Item: Serialize,
{
    let page = repo
        .list(&params.filter(), params.sort(), params.page(), params.limit())
        .await?;
    paginated(page)
}

pub(crate) async fn content_by_slug<R>(repo: &R, slug: &str, noun: &str) -> ApiResult<R::Item>
where
    R: ContentRepository + ?Sized,
    R::Item: Serialize,
{
    match repo.get_by_slug(slug).await? {
        Some(item) => success(item),
        None => Err(AppError::NotFound(format!("{} {} not found", noun, slug))),
    }
}

pub(crate) async fn featured_content<T>(
    repo: &MockRepository<T>,
    params: &FeaturedParams,
) -> ApiResult<Vec<T>>
where
    T: ContentItem + Clone + Serialize + Send + Sync + 'static,
{
    success(repo.featured(params.limit()).await)
}

pub(crate) async fn content_facets<T>(repo: &MockRepository<T>) -> ApiResult<Facets>
where
    T: ContentItem + Clone + Send + Sync + 'static,
{
    success(repo.facets().await)
}
