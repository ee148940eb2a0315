//! HTTP handlers for items-service.

pub mod data;
pub mod health;
pub mod info;

use crate::dtos::FailureResponse;
use crate::services::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Store failure surfaced at the handler boundary.
///
/// Every kind renders as `500 {"success": false, "error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = %self.0.kind(), error = %self.0, "Store request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FailureResponse {
                success: false,
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
