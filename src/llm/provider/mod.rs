// src/llm/provider/mod.rs
// LLM Provider trait and type definitions for multi-provider support

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub mod gemini;
pub mod groq;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;

use crate::config::EduConfig;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[serde(alias = "model")]
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message format for all providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Decoding parameters for a single request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationOptions {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// The four ways an upstream call can fail.
///
/// Payloads carry detail for server-side logs only; callers must not echo
/// them back to clients.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Transient upstream error: {0}")]
    Transient(String),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Map a non-success HTTP status to the error taxonomy
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = format!("{}: {}", status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthFailed(detail),
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
            StatusCode::REQUEST_TIMEOUT => LlmError::Transient(detail),
            s if s.is_server_error() => LlmError::Transient(detail),
            _ => LlmError::InvalidResponse(detail),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else {
            // timeouts, connect failures, broken bodies
            LlmError::Transient(err.to_string())
        }
    }
}

/// Universal LLM provider interface
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Submit role-tagged messages, receive one assistant message back
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
    ) -> Result<Message, LlmError>;

    /// Check the configured credential against the vendor
    async fn validate(&self) -> Result<(), LlmError>;
}

/// Which upstream vendor to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    Gemini,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Groq => f.write_str("groq"),
            ProviderKind::Gemini => f.write_str("gemini"),
        }
    }
}

/// Build the configured provider. A missing key is reported as AuthFailed.
pub fn build_provider(config: &EduConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.provider {
        ProviderKind::Groq => {
            let key = config
                .groq_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| LlmError::AuthFailed("GROQ_API_KEY not set".to_string()))?;
            Ok(Arc::new(GroqProvider::new(
                key,
                config.groq_base_url.clone(),
                config.groq_model.clone(),
            )))
        }
        ProviderKind::Gemini => {
            let key = config
                .gemini_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| LlmError::AuthFailed("GEMINI_API_KEY not set".to_string()))?;
            Ok(Arc::new(GeminiProvider::new(
                key,
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
            )))
        }
    }
}
