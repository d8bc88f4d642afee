// src/llm/mod.rs

pub mod history;
pub mod intent;
pub mod provider;

pub use history::normalize_history;
pub use intent::{Intent, IntentClassifier};
pub use provider::{GenerationOptions, LlmError, LlmProvider, Message, Role};
