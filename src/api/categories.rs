//! Category API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::Category;
use crate::AppState;

/// GET /api/categories - All categories with their article counts.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    success(state.categories.list().await)
}

/// GET /api/categories/:slug - Get a single category.
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Category> {
    match state.categories.get_by_slug(&slug).await {
        Some(category) => success(category),
        None => Err(AppError::NotFound(format!("Category {} not found", slug))),
    }
}
