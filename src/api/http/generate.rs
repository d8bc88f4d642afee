// src/api/http/generate.rs
// Structured content: syllabus, notes, practice tests and video descriptions

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::session::SessionId;
use crate::api::error::{ApiError, ApiResult, tutor_error};
use crate::resources::{Level, Subject};
use crate::state::AppState;

const TEST_SUBJECT_ERROR: &str = "Subject must be math or science for tests";

#[derive(Debug, Deserialize)]
pub struct SyllabusRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    #[serde(default)]
    pub topic: String,
    pub student_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TestRequest {
    #[serde(default)]
    pub subject: String,
    pub student_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyllabusResponse {
    pub syllabus: String,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub test: String,
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub video_description: String,
}

/// POST /syllabus
pub async fn syllabus_handler(
    State(state): State<AppState>,
    Json(request): Json<SyllabusRequest>,
) -> ApiResult<Json<SyllabusResponse>> {
    let tutor = state.tutor()?;
    let subject: Subject = request.subject.parse().map_err(ApiError::bad_request)?;
    let level: Level = request.level.parse().map_err(ApiError::bad_request)?;

    let syllabus = tutor
        .generate_syllabus(subject, level)
        .await
        .map_err(|e| tutor_error("syllabus", e, "Failed to generate syllabus"))?;

    Ok(Json(SyllabusResponse { syllabus }))
}

/// POST /notes
pub async fn notes_handler(
    State(state): State<AppState>,
    Json(request): Json<TopicRequest>,
) -> ApiResult<Json<NotesResponse>> {
    let tutor = state.tutor()?;
    debug!("Notes requested by {:?}", request.student_id);

    let notes = tutor
        .generate_notes(&request.topic)
        .await
        .map_err(|e| tutor_error("notes", e, "Failed to generate notes"))?;

    Ok(Json(NotesResponse { notes }))
}

/// POST /test
pub async fn test_handler(
    State(state): State<AppState>,
    session: SessionId,
    Json(request): Json<TestRequest>,
) -> ApiResult<impl IntoResponse> {
    let tutor = state.tutor()?;
    let subject = request
        .subject
        .parse::<Subject>()
        .ok()
        .filter(Subject::supports_tests)
        .ok_or_else(|| ApiError::bad_request(TEST_SUBJECT_ERROR))?;

    let test = tutor
        .generate_test(session.as_str(), subject, request.student_id.as_deref())
        .await
        .map_err(|e| tutor_error("test", e, "Failed to generate test"))?;

    Ok((session.header(), Json(TestResponse { test })))
}

/// POST /video
pub async fn video_handler(
    State(state): State<AppState>,
    Json(request): Json<TopicRequest>,
) -> ApiResult<Json<VideoResponse>> {
    let tutor = state.tutor()?;
    debug!("Video description requested by {:?}", request.student_id);

    let video_description = tutor
        .generate_video_description(&request.topic)
        .await
        .map_err(|e| tutor_error("video", e, "Failed to generate video description"))?;

    Ok(Json(VideoResponse { video_description }))
}
