// src/llm/intent.rs
// Intent categories and the LLM-backed classifier

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::provider::{GenerationOptions, LlmProvider, Message};

/// Closed set of request categories the classifier may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Explanation,
    Video,
    Notes,
    Test,
    DoubtSolving,
    Motivation,
    Syllabus,
    Default,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::Explanation,
        Intent::Video,
        Intent::Notes,
        Intent::Test,
        Intent::DoubtSolving,
        Intent::Motivation,
        Intent::Syllabus,
        Intent::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Explanation => "EXPLANATION",
            Intent::Video => "VIDEO",
            Intent::Notes => "NOTES",
            Intent::Test => "TEST",
            Intent::DoubtSolving => "DOUBT_SOLVING",
            Intent::Motivation => "MOTIVATION",
            Intent::Syllabus => "SYLLABUS",
            Intent::Default => "DEFAULT",
        }
    }

    /// Resolve a raw model reply to a label. Anything outside the set is DEFAULT.
    pub fn from_label(raw: &str) -> Self {
        let cleaned = raw.trim().to_uppercase().replace(['\'', '"'], "");
        cleaned.parse().unwrap_or(Intent::Default)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or(())
    }
}

/// Uses the LLM itself to label a message. Never fails; degrades to DEFAULT.
pub struct IntentClassifier {
    provider: Arc<dyn LlmProvider>,
}

impl IntentClassifier {
    const MAX_TOKENS: u32 = 20;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    fn classification_prompt(user_input: &str) -> String {
        let labels = Intent::ALL
            .iter()
            .map(Intent::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Analyze the user's message and classify its primary intent into ONE of the following categories: {labels}.\n\
             Respond with the category name only.\n\
             User's message: \"{user_input}\"\n\
             Classification:"
        )
    }

    pub async fn classify(&self, user_input: &str) -> Intent {
        let messages = vec![Message::user(Self::classification_prompt(user_input))];
        let options = GenerationOptions::new(0.0, Self::MAX_TOKENS);

        match self.provider.chat(messages, options).await {
            Ok(reply) => {
                let intent = Intent::from_label(&reply.content);
                debug!("Classified intent {} from raw '{}'", intent, reply.content.trim());
                intent
            }
            Err(e) => {
                warn!("Intent classification failed, using DEFAULT: {}", e);
                Intent::Default
            }
        }
    }
}
