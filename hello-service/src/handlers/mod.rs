//! HTTP handlers for hello-service.

use crate::startup::AppState;
use axum::{extract::State, Json};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;

/// Name reported in response bodies. `SERVICE_NAME` only labels telemetry.
pub const SERVICE: &str = "hello-service";

pub const ENDPOINTS: &[&str] = &["/", "/api/hello", "/api/time", "/health"];

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
    pub container: String,
    pub framework: &'static str,
    pub runtime: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TimeResponse {
    pub timestamp: String,
    pub date: String,
    pub time: String,
    pub day: String,
}

impl TimeResponse {
    /// Render `now` as ISO-8601 plus its date, time and weekday parts.
    ///
    /// Fractional seconds appear in `timestamp` only when non-zero, at
    /// microsecond precision.
    pub fn at(now: NaiveDateTime) -> Self {
        let timestamp = if now.nanosecond() / 1_000 == 0 {
            now.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        };

        Self {
            timestamp,
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            day: now.format("%A").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /`
pub async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Welcome to the Hello API!",
        version: "1.0",
        endpoints: ENDPOINTS,
    })
}

/// `GET /api/hello`
pub async fn hello(State(state): State<AppState>) -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from hello-service!",
        container: state.container.hostname.clone(),
        framework: "axum",
        runtime: state.container.runtime.clone(),
    })
}

/// `GET /api/time`, in the server's local time zone.
pub async fn time() -> Json<TimeResponse> {
    Json(TimeResponse::at(Local::now().naive_local()))
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE,
    })
}
