//! Search API endpoints.

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::models::SearchResult;
use crate::pipeline::MAX_PAGE_SIZE;
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Search query string; blank matches everything.
    #[serde(default)]
    pub q: String,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl SearchQuery {
    fn limit_or(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
    }
}

/// GET /api/search - Search articles and library resources.
pub async fn global_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<SearchResult>> {
    let limit = params.limit_or(10);
    success(state.search.global_search(&params.q, limit).await)
}

/// GET /api/search/suggestions - Title and tag completions.
pub async fn search_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<String>> {
    let limit = params.limit_or(5);
    success(state.search.suggestions(&params.q, limit).await)
}

/// GET /api/search/trending - Trending queries.
pub async fn trending_searches(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<String>> {
    let limit = params.limit_or(10);
    success(state.search.trending(limit).await)
}

/// GET /api/search/tags - Most used tags.
pub async fn popular_tags(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<String>> {
    let limit = params.limit_or(10);
    success(state.search.popular_tags(limit).await)
}

/// GET /api/search/related - Tags related to a query.
pub async fn related_searches(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<String>> {
    let limit = params.limit_or(5);
    success(state.search.related(&params.q, limit).await)
}
