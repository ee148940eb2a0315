use crate::dtos::InfoResponse;
use axum::Json;

pub const ENDPOINTS: &[&str] = &["/", "/api/data", "/api/count", "/health"];

/// `GET /`
pub async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Backend API - Complete Stack",
        version: "1.0",
        endpoints: ENDPOINTS,
    })
}
