//! Library resource API endpoints.

use axum::extract::{Path, Query, State};

use super::{
    content_by_slug, content_facets, featured_content, list_content, ApiResult, FeaturedParams,
    ListParams,
};
use crate::models::LibraryItem;
use crate::repository::Facets;
use crate::AppState;

/// GET /api/library - Filtered, sorted, paginated resources.
pub async fn list_library(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<LibraryItem>> {
    list_content(state.library.as_ref(), &params).await
}

/// GET /api/library/featured - Featured resources.
pub async fn featured_library(
    State(state): State<AppState>,
    Query(params): Query<FeaturedParams>,
) -> ApiResult<Vec<LibraryItem>> {
    featured_content(&*state.library, &params).await
}

/// GET /api/library/facets - Tags, languages, types and levels in use.
pub async fn library_facets(State(state): State<AppState>) -> ApiResult<Facets> {
    content_facets(&*state.library).await
}

/// GET /api/library/:slug - Get a single resource.
pub async fn get_library_item(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<LibraryItem> {
    content_by_slug(state.library.as_ref(), &slug, "Resource").await
}
