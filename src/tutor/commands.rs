// src/tutor/commands.rs
// Slash commands handled locally, before classification and without the LLM

use rand::seq::IndexedRandom;

use crate::resources::{ResourceCatalog, Subject};
use crate::session::SessionState;

pub const SUBJECT_USAGE: &str = "Please provide a subject, e.g., /subject math.";
pub const INVALID_SUBJECT: &str = "Invalid subject. Use math, science, history, or languages.";
pub const QUIZ_USAGE: &str =
    "Quizzes are available for math and science. Pick one first, e.g., /subject math.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/subject <name>`; the argument is None when missing
    SetSubject(Option<String>),
    StartQuiz,
}

impl Command {
    /// Positional parse of a reserved-prefix message. None for ordinary chat.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim_start();
        let lower = trimmed.to_lowercase();

        if lower.starts_with("/subject") {
            let arg = trimmed
                .split_once(' ')
                .map(|(_, rest)| rest.trim().to_string())
                .filter(|rest| !rest.is_empty());
            return Some(Command::SetSubject(arg));
        }

        if lower.split_whitespace().next() == Some("/quiz") {
            return Some(Command::StartQuiz);
        }

        None
    }

    /// Apply to the session and produce the reply shown to the student
    pub fn execute(self, session: &mut SessionState, resources: &ResourceCatalog) -> String {
        match self {
            Command::SetSubject(None) => SUBJECT_USAGE.to_string(),
            Command::SetSubject(Some(name)) => match name.parse::<Subject>() {
                Ok(subject) => {
                    session.current_subject = Some(subject);
                    format!("Great! Subject set to {subject}.")
                }
                Err(_) => INVALID_SUBJECT.to_string(),
            },
            Command::StartQuiz => {
                let Some(subject) = session.current_subject.filter(Subject::supports_tests) else {
                    return QUIZ_USAGE.to_string();
                };
                match resources.quiz_questions(subject).choose(&mut rand::rng()) {
                    Some(question) => {
                        session.pending_quiz = Some(question.to_string());
                        format!("Quiz time ({subject})! {question}\nReply with your answer.")
                    }
                    None => QUIZ_USAGE.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::RESOURCES;

    #[test]
    fn test_parse_subject_command() {
        assert_eq!(
            Command::parse("/subject math"),
            Some(Command::SetSubject(Some("math".to_string())))
        );
        assert_eq!(
            Command::parse("/SUBJECT   Science  "),
            Some(Command::SetSubject(Some("Science".to_string())))
        );
        assert_eq!(Command::parse("/subject"), Some(Command::SetSubject(None)));
        assert_eq!(Command::parse("/subject   "), Some(Command::SetSubject(None)));
    }

    #[test]
    fn test_parse_ordinary_text() {
        assert_eq!(Command::parse("What is photosynthesis?"), None);
        assert_eq!(Command::parse("my subject is math"), None);
        assert_eq!(Command::parse("/quizzical"), None);
        assert_eq!(Command::parse("/quiz"), Some(Command::StartQuiz));
    }

    #[test]
    fn test_set_subject() {
        let mut session = SessionState::new();
        let reply = Command::SetSubject(Some("History".to_string())).execute(&mut session, &RESOURCES);
        assert_eq!(reply, "Great! Subject set to history.");
        assert_eq!(session.current_subject, Some(Subject::History));
    }

    #[test]
    fn test_invalid_subject_leaves_state_alone() {
        let mut session = SessionState::new();
        session.current_subject = Some(Subject::Math);

        let reply = Command::SetSubject(Some("chemistry".to_string())).execute(&mut session, &RESOURCES);
        assert_eq!(reply, INVALID_SUBJECT);
        assert_eq!(session.current_subject, Some(Subject::Math));

        let reply = Command::SetSubject(None).execute(&mut session, &RESOURCES);
        assert_eq!(reply, SUBJECT_USAGE);
    }

    #[test]
    fn test_quiz_needs_quiz_subject() {
        let mut session = SessionState::new();
        assert_eq!(Command::StartQuiz.execute(&mut session, &RESOURCES), QUIZ_USAGE);

        session.current_subject = Some(Subject::Languages);
        assert_eq!(Command::StartQuiz.execute(&mut session, &RESOURCES), QUIZ_USAGE);
        assert!(session.pending_quiz.is_none());
    }

    #[test]
    fn test_quiz_opens_question() {
        let mut session = SessionState::new();
        session.current_subject = Some(Subject::Science);

        let reply = Command::StartQuiz.execute(&mut session, &RESOURCES);
        let question = session.pending_quiz.clone().unwrap();
        assert!(RESOURCES.quiz_questions(Subject::Science).contains(&question.as_str()));
        assert!(reply.contains(&question));
    }
}
