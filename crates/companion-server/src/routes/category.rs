//! Category Routes

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiError;
use crate::models::CategoryResponse;
use crate::AppState;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/category",
    responses(
        (status = 200, description = "All categories by name", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Category"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state
        .category_service
        .list_all()
        .await
        .map_err(ApiError::tagged("CATEGORY_GET"))?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/category", get(list_categories))
}
