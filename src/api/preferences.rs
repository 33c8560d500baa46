//! Theme preference endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::Theme;
use crate::AppState;

/// GET /api/preferences/theme - Current theme.
pub async fn get_theme(State(state): State<AppState>) -> ApiResult<Theme> {
    success(state.theme.theme().await)
}

/// PUT /api/preferences/theme - Replace the theme.
pub async fn put_theme(State(state): State<AppState>, Json(theme): Json<Theme>) -> ApiResult<Theme> {
    success(state.theme.set_theme(theme).await?)
}

/// POST /api/preferences/theme/toggle - Flip between light and dark.
pub async fn toggle_theme(State(state): State<AppState>) -> ApiResult<Theme> {
    success(state.theme.toggle().await?)
}
