// src/api/http/session.rs
// Per-caller session id carried in the `x-session-id` header

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, request::Parts},
};
use std::convert::Infallible;

use crate::session::generate_session_id;

pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// Session id from the request header, or a freshly issued one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Response header echoing the id back so clients can keep it
    pub fn header(&self) -> [(HeaderName, String); 1] {
        [(HeaderName::from_static(SESSION_HEADER), self.0.clone())]
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_SESSION_ID_LEN)
            .map(str::to_string)
            .unwrap_or_else(generate_session_id);
        Ok(SessionId(id))
    }
}
