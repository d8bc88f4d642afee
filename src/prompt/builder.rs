// src/prompt/builder.rs
// Context assembler: template + session snapshot + trailing history -> one request

use crate::llm::{Message, Role, normalize_history};
use crate::persona::PromptTemplate;
use crate::resources::ResourceCatalog;
use crate::session::SessionState;

pub const ANTI_REPETITION_RULE: &str =
    "CRITICAL: Do NOT repeat or translate the user's question. Answer directly.";

pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Builds the outbound message list for a chat turn
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    window: usize,
    resources_json: String,
}

impl ContextAssembler {
    pub fn new(window: usize, resources: &ResourceCatalog) -> Self {
        Self {
            window,
            resources_json: resources.to_json(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Machine-readable snapshot of the session injected into the system turn
    pub fn context_snapshot(&self, session: &SessionState) -> String {
        let subject = session
            .current_subject
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Not Set".to_string());
        let achievements =
            serde_json::to_string(&session.achievements).unwrap_or_else(|_| "[]".to_string());

        let mut snapshot = String::from("CURRENT CONTEXT:\n");
        snapshot.push_str(&format!("- Study Status: {}\n", session.study_status));
        snapshot.push_str(&format!("- Current Subject: {}\n", subject));
        snapshot.push_str(&format!("- Resources: {}\n", self.resources_json));
        snapshot.push_str(&format!("- XP: {}\n", session.xp));
        snapshot.push_str(&format!("- Achievements: {}\n", achievements));
        if let Some(question) = &session.pending_quiz {
            snapshot.push_str(&format!("- Pending Quiz Question: {}\n", question));
        }
        snapshot
    }

    pub fn system_prompt(
        &self,
        session: &SessionState,
        template: &PromptTemplate,
        extra_rules: Option<&str>,
    ) -> String {
        let mut prompt = String::new();
        prompt.push_str(template.persona);
        prompt.push('\n');
        prompt.push_str(&self.context_snapshot(session));
        prompt.push('\n');
        prompt.push_str("RULES:\n");
        prompt.push_str(template.rules);
        prompt.push('\n');
        prompt.push_str(ANTI_REPETITION_RULE);
        if let Some(extra) = extra_rules {
            prompt.push('\n');
            prompt.push_str(extra);
        }
        prompt
    }

    /// One system turn, the trailing history window, then the new user turn.
    ///
    /// History and the user turn are normalized together, so the result always
    /// ends with a user turn even if the window itself ended on one.
    pub fn assemble(
        &self,
        session: &SessionState,
        template: &PromptTemplate,
        user_text: &str,
        extra_rules: Option<&str>,
    ) -> Vec<Message> {
        let history = &session.chat_history;
        let start = history.len().saturating_sub(self.window);

        let mut turns: Vec<Message> = history[start..]
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect();
        turns.push(Message::user(user_text));

        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(Message::system(self.system_prompt(session, template, extra_rules)));
        messages.extend(normalize_history(&turns));
        messages
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW, &crate::resources::RESOURCES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Intent, Role};
    use crate::persona::TemplateRegistry;
    use crate::resources::Subject;

    fn session_with_history(turns: usize) -> SessionState {
        let mut session = SessionState::new();
        for i in 0..turns {
            session.record_turn(&format!("question {i}"), &format!("answer {i}"));
        }
        session
    }

    #[test]
    fn test_shape_starts_system_ends_user() {
        let assembler = ContextAssembler::default();
        let registry = TemplateRegistry::builtin();

        for turns in [0, 1, 2, 5] {
            let session = session_with_history(turns);
            let messages = assembler.assemble(
                &session,
                registry.get(Intent::Explanation),
                "What is photosynthesis?",
                None,
            );

            assert_eq!(messages[0].role, Role::System);
            assert_eq!(
                messages.iter().filter(|m| m.role == Role::System).count(),
                1
            );
            let last = messages.last().unwrap();
            assert_eq!(last.role, Role::User);
            assert_eq!(last.content, "What is photosynthesis?");
        }
    }

    #[test]
    fn test_window_limits_history() {
        let assembler = ContextAssembler::default();
        let registry = TemplateRegistry::builtin();
        let session = session_with_history(10);

        let messages = assembler.assemble(&session, registry.get(Intent::Default), "next", None);
        // system + 6 history + user
        assert_eq!(messages.len(), 8);
        assert_eq!(messages[1].content, "question 7");
    }

    #[test]
    fn test_custom_window() {
        let assembler = ContextAssembler::new(2, &crate::resources::RESOURCES);
        let registry = TemplateRegistry::builtin();
        let session = session_with_history(4);

        let messages = assembler.assemble(&session, registry.get(Intent::Default), "next", None);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "question 3");
        assert_eq!(messages[2].content, "answer 3");
    }

    #[test]
    fn test_trailing_user_turn_is_merged() {
        let assembler = ContextAssembler::default();
        let registry = TemplateRegistry::builtin();
        let mut session = SessionState::new();
        session.chat_history.push(Message::user("dangling"));

        let messages = assembler.assemble(&session, registry.get(Intent::Default), "new", None);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "dangling new");
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_system_prompt_contains_template_and_context() {
        let assembler = ContextAssembler::default();
        let registry = TemplateRegistry::builtin();
        let template = registry.get(Intent::Motivation);

        let mut session = SessionState::new();
        session.current_subject = Some(Subject::History);
        session.xp = 150;
        session.add_achievement("Mock Test Ace");

        let messages = assembler.assemble(&session, template, "I feel stuck", None);
        let system = &messages[0].content;

        assert!(system.contains(template.persona));
        assert!(system.contains(template.rules));
        assert!(system.contains("RULES:\n"));
        assert!(system.contains("- Current Subject: history"));
        assert!(system.contains("- XP: 150"));
        assert!(system.contains("[\"Mock Test Ace\"]"));
        assert!(system.contains("Khan Academy"));
        assert!(system.ends_with(ANTI_REPETITION_RULE));
    }

    #[test]
    fn test_unset_subject_and_quiz_context() {
        let assembler = ContextAssembler::default();
        let registry = TemplateRegistry::builtin();
        let mut session = SessionState::new();
        session.pending_quiz = Some("Solve 2x + 3 = 7".to_string());

        let system = assembler.system_prompt(&session, registry.get(Intent::Default), Some("GRADE IT"));
        assert!(system.contains("- Current Subject: Not Set"));
        assert!(system.contains("- Pending Quiz Question: Solve 2x + 3 = 7"));
        assert!(system.ends_with("GRADE IT"));
    }
}
