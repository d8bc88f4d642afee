// src/api/http/gamification.rs
// XP, badges, levels, challenges and per-student progress

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::{Value, json};

use super::session::SessionId;
use crate::api::error::ApiResult;
use crate::state::AppState;
use crate::tutor::Challenges;

/// GET /achievements
pub async fn achievements_handler(
    State(state): State<AppState>,
    session: SessionId,
) -> ApiResult<impl IntoResponse> {
    let view = state.tutor()?.achievements(session.as_str()).await;
    Ok((session.header(), Json(view)))
}

/// POST /level-up
pub async fn level_up_handler(
    State(state): State<AppState>,
    session: SessionId,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.tutor()?.level_up(session.as_str()).await;
    Ok((session.header(), Json(outcome)))
}

/// GET /challenges
pub async fn challenges_handler(State(state): State<AppState>) -> ApiResult<Json<Challenges>> {
    Ok(Json(state.tutor()?.challenges()))
}

/// GET /progress/{student_id}
pub async fn progress_handler(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let progress = state.tutor()?.progress(&student_id).await;
    Ok(Json(json!({ "progress": progress })))
}
