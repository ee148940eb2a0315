//! JSON response bodies.

use crate::models::Item;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub success: bool,
    pub data: Vec<Item>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: i64,
}

/// Body of every failed data request.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}
