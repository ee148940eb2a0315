use crate::dtos::{CountResponse, ItemsResponse};
use crate::handlers::ApiError;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `GET /api/data`
pub async fn list_items(State(state): State<AppState>) -> Result<Json<ItemsResponse>, ApiError> {
    let items = state.store.list_items().await?;
    Ok(Json(ItemsResponse {
        success: true,
        count: items.len(),
        data: items,
    }))
}

/// `GET /api/count`
pub async fn count_items(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let count = state.store.count_items().await?;
    Ok(Json(CountResponse {
        success: true,
        count,
    }))
}
