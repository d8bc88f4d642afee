// src/api/http/router.rs
// HTTP router composition for the REST API

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::{
    chat::{chat_handler, generate_handler},
    gamification::{achievements_handler, challenges_handler, level_up_handler, progress_handler},
    generate::{notes_handler, syllabus_handler, test_handler, video_handler},
    handlers::root_handler,
};
use crate::state::AppState;

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(origin.trim()) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!("Invalid CORS origin '{}', allowing any", origin);
                AllowOrigin::from(Any)
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any)
}

/// Create the web server router
pub fn create_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/", get(root_handler))
        // Conversation
        .route("/chat", post(chat_handler))
        .route("/generate", post(generate_handler))
        // Structured content
        .route("/syllabus", post(syllabus_handler))
        .route("/notes", post(notes_handler))
        .route("/test", post(test_handler))
        .route("/video", post(video_handler))
        // Gamification
        .route("/achievements", get(achievements_handler))
        .route("/level-up", post(level_up_handler))
        .route("/challenges", get(challenges_handler))
        .route("/progress/{student_id}", get(progress_handler))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
