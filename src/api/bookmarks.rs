//! Bookmark endpoints.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Bookmark, NewBookmark};
use crate::AppState;

/// `?id=` of the bookmark to delete.
#[derive(Debug, Deserialize)]
pub struct BookmarkIdQuery {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct RemovedBookmark {
    pub id: String,
}

/// GET /api/bookmarks - All bookmarks in insertion order.
pub async fn list_bookmarks(State(state): State<AppState>) -> ApiResult<Vec<Bookmark>> {
    success(state.bookmarks.list().await)
}

/// POST /api/bookmarks - Add a bookmark; re-adding returns the existing one.
pub async fn add_bookmark(
    State(state): State<AppState>,
    Json(request): Json<NewBookmark>,
) -> ApiResult<Bookmark> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("Bookmark url is required".to_string()));
    }
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Bookmark title is required".to_string()));
    }

    success(state.bookmarks.add(request).await?)
}

/// DELETE /api/bookmarks?id= - Remove a bookmark.
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Query(params): Query<BookmarkIdQuery>,
) -> ApiResult<RemovedBookmark> {
    if state.bookmarks.remove(&params.id).await? {
        success(RemovedBookmark { id: params.id })
    } else {
        Err(AppError::NotFound(format!("Bookmark {} not found", params.id)))
    }
}

/// GET /api/bookmarks/export - Download bookmarks as a JSON file.
pub async fn export_bookmarks(State(state): State<AppState>) -> Result<Response, AppError> {
    let export = state.bookmarks.export().await?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}
