// src/api/http/chat.rs
// Conversational endpoints: the tutored chat and the stateless relay

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::session::SessionId;
use crate::api::error::{ApiResult, tutor_error};
use crate::llm::Message;
use crate::state::AppState;
use crate::tutor::{TutorError, degraded_reply};

pub const EMPTY_MESSAGE_REPLY: &str = "Please ask something.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
    pub history: Vec<Message>,
}

/// POST /chat
pub async fn chat_handler(
    State(state): State<AppState>,
    session: SessionId,
    Json(request): Json<ChatRequest>,
) -> ApiResult<impl IntoResponse> {
    let tutor = state.tutor()?;

    let reply = match tutor.process_message(session.as_str(), &request.message).await {
        Ok(reply) => reply,
        Err(TutorError::InvalidInput(_)) => EMPTY_MESSAGE_REPLY.to_string(),
        Err(TutorError::Upstream(e)) => degraded_reply(&e).to_string(),
    };

    info!(
        "Chat reply for session {} ({} chars)",
        session.as_str(),
        reply.len()
    );
    Ok((session.header(), Json(ChatResponse { reply })))
}

/// POST /generate
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let tutor = state.tutor()?;

    let (response, history) = tutor
        .relay(&request.prompt, request.history)
        .await
        .map_err(|e| tutor_error("generate", e, "Failed to generate a response"))?;

    Ok(Json(GenerateResponse { response, history }))
}
