// src/persona/mod.rs
// Template registry: which persona and rules to use for each intent.

pub mod default;

use std::collections::HashMap;

use crate::llm::Intent;
use default::*;

/// Voice plus required response structure for one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub persona: &'static str,
    pub rules: &'static str,
}

impl PromptTemplate {
    pub const fn new(persona: &'static str, rules: &'static str) -> Self {
        Self { persona, rules }
    }

    /// Persona followed by rules, for single-shot generation requests
    pub fn system_prompt(&self) -> String {
        format!("{}\n{}", self.persona, self.rules)
    }
}

/// Immutable intent -> template lookup. Missing intents resolve to DEFAULT.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<Intent, PromptTemplate>,
    fallback: PromptTemplate,
}

impl TemplateRegistry {
    pub fn builtin() -> Self {
        let default = PromptTemplate::new(DEFAULT_PERSONA, DEFAULT_RULES);
        Self::from_entries(
            default.clone(),
            [
                (Intent::Default, default),
                (
                    Intent::Explanation,
                    PromptTemplate::new(EXPLANATION_PERSONA, EXPLANATION_RULES),
                ),
                (Intent::Video, PromptTemplate::new(VIDEO_PERSONA, VIDEO_RULES)),
                (Intent::Notes, PromptTemplate::new(NOTES_PERSONA, NOTES_RULES)),
                (Intent::Test, PromptTemplate::new(TEST_PERSONA, TEST_RULES)),
                (
                    Intent::DoubtSolving,
                    PromptTemplate::new(DOUBT_SOLVING_PERSONA, DOUBT_SOLVING_RULES),
                ),
                (
                    Intent::Motivation,
                    PromptTemplate::new(MOTIVATION_PERSONA, MOTIVATION_RULES),
                ),
                (
                    Intent::Syllabus,
                    PromptTemplate::new(SYLLABUS_PERSONA, SYLLABUS_RULES),
                ),
            ],
        )
    }

    pub fn from_entries(
        fallback: PromptTemplate,
        entries: impl IntoIterator<Item = (Intent, PromptTemplate)>,
    ) -> Self {
        Self {
            templates: entries.into_iter().collect(),
            fallback,
        }
    }

    pub fn get(&self, intent: Intent) -> &PromptTemplate {
        self.templates.get(&intent).unwrap_or(&self.fallback)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
