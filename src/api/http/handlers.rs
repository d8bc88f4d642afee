// src/api/http/handlers.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Liveness probe. Answers even when the tutor failed to initialize.
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "message": "EduMentor backend is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
