// src/llm/provider/groq.rs
// Groq Chat Completions provider (OpenAI-compatible)

use super::{GenerationOptions, LlmError, LlmProvider, Message, Role};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqProvider {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Flat role/content list, system turns included in place
    fn build_body(&self, messages: &[Message], options: GenerationOptions) -> Value {
        let api_messages: Vec<Value> = messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.as_str(),
                    "content": msg.content
                })
            })
            .collect();

        json!({
            "model": self.model,
            "messages": api_messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        })
    }

    fn parse_content(raw: &Value) -> Result<String, LlmError> {
        raw["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| LlmError::InvalidResponse("No content in Groq response".to_string()))
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn chat(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
    ) -> Result<Message, LlmError> {
        let start = Instant::now();
        let body = self.build_body(&messages, options);

        debug!(
            "Groq request: model={}, messages={}, temperature={}",
            self.model,
            messages.len(),
            options.temperature
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status, &error_text));
        }

        let raw = response.json::<Value>().await?;
        let content = Self::parse_content(&raw)?;

        debug!("Groq response in {}ms", start.elapsed().as_millis());
        Ok(Message::new(Role::Assistant, content))
    }

    async fn validate(&self) -> Result<(), LlmError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status, &error_text));
        }
        Ok(())
    }
}
