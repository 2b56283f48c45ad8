//! HTTP handlers. Each returns `crate::error::Result` so failures render
//! through `GuideError`'s JSON bodies.

pub mod accounts;
pub mod catalog;
pub mod packlists;
pub mod reviews;

use crate::error::{GuideError, Result};
use crate::metrics;
use axum::{http::header, response::IntoResponse, Json};
use uuid::Uuid;

pub(crate) fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| GuideError::Validation(format!("Invalid id: {raw}")))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition; empty when no recorder is installed.
pub async fn metrics_text() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::render().unwrap_or_default(),
    )
}
