//! Article API endpoints.

use axum::extract::{Path, Query, State};

use super::{
    content_by_slug, content_facets, featured_content, list_content, ApiResult, FeaturedParams,
    ListParams,
};
use crate::models::Article;
use crate::repository::Facets;
use crate::AppState;

/// GET /api/articles - Filtered, sorted, paginated articles.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Article>> {
    list_content(state.articles.as_ref(), &params).await
}

/// GET /api/articles/featured - Featured articles.
pub async fn featured_articles(
    State(state): State<AppState>,
    Query(params): Query<FeaturedParams>,
) -> ApiResult<Vec<Article>> {
    featured_content(&*state.articles, &params).await
}

/// GET /api/articles/facets - Tags, languages and categories in use.
pub async fn article_facets(State(state): State<AppState>) -> ApiResult<Facets> {
    content_facets(&*state.articles).await
}

/// GET /api/articles/:slug - Get a single article.
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Article> {
    content_by_slug(state.articles.as_ref(), &slug, "Article").await
}
