//! REST API module.
//!
//! Contains all API routes and handlers following the site's client contract.

mod articles;
mod bookmarks;
mod categories;
mod contact;
mod content;
mod library;
mod preferences;
mod search;

pub use articles::*;
pub use bookmarks::*;
pub use categories::*;
pub use contact::*;
pub use content::*;
pub use library::*;
pub use preferences::*;
pub use search::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::pipeline::{Page, PaginationInfo};

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Create a successful response carrying one page of a listing.
pub fn paginated<T: Serialize>(page: Page<T>) -> ApiResult<Vec<T>> {
    Ok(ApiResponse {
        success: true,
        data: page.data,
        pagination: Some(page.pagination),
    })
}
