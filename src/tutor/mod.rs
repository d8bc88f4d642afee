// src/tutor/mod.rs
// The EduMentor dispatcher: classify, pick a template, assemble context, call the LLM

pub mod commands;
pub mod grading;

use rand::seq::IndexedRandom;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::llm::{
    GenerationOptions, Intent, IntentClassifier, LlmError, LlmProvider, Message, normalize_history,
};
use crate::persona::TemplateRegistry;
use crate::progress::{Action, LevelState, ProgressTracker};
use crate::prompt::{ContextAssembler, DEFAULT_HISTORY_WINDOW};
use crate::resources::{Level, RESOURCES, ResourceCatalog, Subject};
use crate::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL, SessionStore};

pub use commands::Command;
pub use grading::GradingStrategy;

/// Temperature used by the stateless relay
const RELAY_TEMPERATURE: f32 = 0.7;

#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Upstream(#[from] LlmError),
}

pub type TutorResult<T> = Result<T, TutorError>;

/// Knobs the composition root passes in
#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub history_window: usize,
    pub llm_timeout: Duration,
    pub grading: GradingStrategy,
    pub session_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_tokens: 1000,
            history_window: DEFAULT_HISTORY_WINDOW,
            llm_timeout: Duration::from_secs(60),
            grading: GradingStrategy::default(),
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementsView {
    pub achievements: Vec<String>,
    pub xp: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Challenges {
    pub daily: String,
    pub weekly: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelUpOutcome {
    pub leveled_up: bool,
    pub level: u32,
    pub points: u64,
    pub threshold: u64,
}

impl LevelUpOutcome {
    fn new(leveled_up: bool, state: LevelState) -> Self {
        Self {
            leveled_up,
            level: state.level,
            points: state.points,
            threshold: state.threshold,
        }
    }
}

/// Reply shown to the student when a chat turn's upstream call fails
pub fn degraded_reply(err: &LlmError) -> &'static str {
    match err {
        LlmError::RateLimited => "⚠️ Too many requests. Please try again later.",
        LlmError::AuthFailed(_) => "⚠️ The assistant is not configured correctly. Please contact the administrator.",
        LlmError::Transient(_) => "⚠️ Technical issue. Please try again.",
        LlmError::InvalidResponse(_) => "⚠️ An error occurred. Please try again.",
    }
}

pub struct Tutor {
    provider: Arc<dyn LlmProvider>,
    classifier: IntentClassifier,
    templates: TemplateRegistry,
    assembler: ContextAssembler,
    resources: &'static ResourceCatalog,
    sessions: SessionStore,
    progress: ProgressTracker,
    config: TutorConfig,
}

impl Tutor {
    pub fn new(provider: Arc<dyn LlmProvider>, config: TutorConfig) -> Self {
        info!(
            "Tutor ready: provider={}, history_window={}, grading={:?}",
            provider.name(),
            config.history_window,
            config.grading
        );
        Self {
            classifier: IntentClassifier::new(provider.clone()),
            provider,
            templates: TemplateRegistry::builtin(),
            assembler: ContextAssembler::new(config.history_window, &RESOURCES),
            resources: &RESOURCES,
            sessions: SessionStore::with_limits(config.session_ttl, config.max_sessions),
            progress: ProgressTracker::new(),
            config,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    fn default_options(&self) -> GenerationOptions {
        GenerationOptions::new(self.config.temperature, self.config.max_tokens)
    }

    /// Every upstream call goes through here; a timeout is a transient failure
    async fn call_llm(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
    ) -> Result<String, LlmError> {
        match tokio::time::timeout(self.config.llm_timeout, self.provider.chat(messages, options))
            .await
        {
            Ok(Ok(reply)) => Ok(reply.content),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(LlmError::Transient(format!(
                "no response within {:?}",
                self.config.llm_timeout
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Conversation
    // ------------------------------------------------------------------

    /// One chat turn. Upstream failures come back as a degraded reply, not an error.
    pub async fn process_message(&self, session_id: &str, user_input: &str) -> TutorResult<String> {
        if user_input.trim().is_empty() {
            return Err(TutorError::InvalidInput("message is empty".to_string()));
        }

        let session = self.sessions.get_or_create(session_id).await;
        let _turn = session.begin_turn().await;

        let snapshot = {
            let mut state = session.lock().await;
            if let Some(command) = Command::parse(user_input) {
                debug!("Session {} command {:?}", session_id, command);
                return Ok(command.execute(&mut state, self.resources));
            }
            state.clone()
        };

        let intent = match tokio::time::timeout(
            self.config.llm_timeout,
            self.classifier.classify(user_input),
        )
        .await
        {
            Ok(intent) => intent,
            Err(_) => {
                warn!("Intent classification timed out, using DEFAULT");
                Intent::Default
            }
        };
        let template = self.templates.get(intent);
        let grading_rules = snapshot
            .pending_quiz
            .as_ref()
            .and_then(|_| self.config.grading.instruction());
        let messages = self
            .assembler
            .assemble(&snapshot, template, user_input, grading_rules);

        info!(
            "Session {} turn: intent={}, outbound_messages={}",
            session_id,
            intent,
            messages.len()
        );

        let reply = match self.call_llm(messages, self.default_options()).await {
            Ok(text) => text,
            Err(e) => {
                // nothing is committed: history stays clean and an open quiz stays open
                error!("Chat completion failed for session {}: {}", session_id, e);
                return Ok(degraded_reply(&e).to_string());
            }
        };

        let mut state = session.lock().await;
        state.record_turn(user_input, &reply);

        if let Some(question) = state.pending_quiz.take() {
            if self.config.grading.is_correct(&reply) {
                info!("Session {} answered quiz correctly: {}", session_id, question);
                state.apply(Action::QuizCompleted);
            } else {
                debug!("Session {} quiz answer not graded correct", session_id);
            }
        }

        Ok(reply)
    }

    /// Stateless pass-through: normalize the supplied history plus the prompt
    /// and return the reply with the extended history.
    pub async fn relay(
        &self,
        prompt: &str,
        mut history: Vec<Message>,
    ) -> TutorResult<(String, Vec<Message>)> {
        if prompt.trim().is_empty() {
            return Err(TutorError::InvalidInput(
                "Prompt is required and cannot be empty.".to_string(),
            ));
        }

        history.push(Message::user(prompt));
        let outbound = normalize_history(&history);
        let options = GenerationOptions::new(RELAY_TEMPERATURE, self.config.max_tokens);

        let reply = self.call_llm(outbound, options).await?;
        history.push(Message::assistant(reply.clone()));
        Ok((reply, history))
    }

    // ------------------------------------------------------------------
    // Structured generation
    // ------------------------------------------------------------------

    async fn generate(&self, intent: Intent, prompt: String) -> TutorResult<String> {
        let template = self.templates.get(intent);
        let messages = vec![
            Message::system(template.system_prompt()),
            Message::user(prompt),
        ];
        debug!("Generating {} content", intent);
        Ok(self.call_llm(messages, self.default_options()).await?)
    }

    pub async fn generate_syllabus(&self, subject: Subject, level: Level) -> TutorResult<String> {
        let prompt = format!(
            "Create a comprehensive, university-level syllabus for a course titled \"{level} {subject}\".\n\
             Follow this structure:\n\
             - Course Description\n\
             - Learning Objectives\n\
             - Week-by-week Topics (8 weeks)\n\
             - Suggested Readings\n\
             - Final Assessment"
        );
        self.generate(Intent::Syllabus, prompt).await
    }

    pub async fn generate_video_description(&self, topic: &str) -> TutorResult<String> {
        let topic = require_text(topic, "topic")?;
        let prompt = format!(
            "Describe an animated video lesson for the topic \"{topic}\".\n\
             Include:\n\
             - A brief introduction to the topic\n\
             - Step-by-step explanation of key concepts\n\
             - Description of visuals (e.g., diagrams, animations)\n\
             - A closing summary\n\
             Keep it concise and engaging."
        );
        self.generate(Intent::Video, prompt).await
    }

    pub async fn generate_notes(&self, topic: &str) -> TutorResult<String> {
        let topic = require_text(topic, "topic")?;
        let prompt = format!(
            "Generate detailed study notes for the topic \"{topic}\".\n\
             Structure the notes as follows:\n\
             - Introduction: Brief overview of the topic\n\
             - Key Concepts: Detailed explanation with examples\n\
             - Summary: Concise recap of main points\n\
             - Formulas/Shortcuts: Include if applicable"
        );
        self.generate(Intent::Notes, prompt).await
    }

    /// Practice test. On success awards `test_completed` and counts an attempt.
    pub async fn generate_test(
        &self,
        session_id: &str,
        subject: Subject,
        student_id: Option<&str>,
    ) -> TutorResult<String> {
        if !subject.supports_tests() {
            return Err(TutorError::InvalidInput(
                "Subject must be math or science for tests".to_string(),
            ));
        }

        let prompt = format!(
            "Generate a practice test for {subject} with 5 multiple-choice questions.\n\
             For each question, provide:\n\
             - The question\n\
             - Four answer options (A, B, C, D)\n\
             - The correct answer\n\
             - A brief explanation of the correct answer\n\
             Suggest one weak area for improvement based on the subject."
        );
        let test = self.generate(Intent::Test, prompt).await?;

        self.award(session_id, Action::TestCompleted.as_str(), student_id)
            .await;
        if let Some(student_id) = student_id {
            self.record_attempt(student_id, subject).await;
        }
        Ok(test)
    }

    // ------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------

    /// Award XP and badge for a completion event. Unknown actions are a no-op.
    pub async fn award(&self, session_id: &str, action: &str, student_id: Option<&str>) {
        let Ok(action) = action.parse::<Action>() else {
            warn!("Ignoring unknown award action '{}'", action);
            return;
        };

        let session = self.sessions.get_or_create(session_id).await;
        session.lock().await.apply(action);

        if let Some(student_id) = student_id {
            self.progress.add_xp(student_id, action.xp()).await;
        }
        info!(
            "Awarded {} (+{} XP) to session {}",
            action.as_str(),
            action.xp(),
            session_id
        );
    }

    pub async fn record_attempt(&self, student_id: &str, subject: Subject) {
        self.progress.record_attempt(student_id, subject).await;
    }

    pub async fn level_up(&self, session_id: &str) -> LevelUpOutcome {
        let Some(session) = self.sessions.get(session_id).await else {
            return LevelUpOutcome::new(false, LevelState::default());
        };
        let mut state = session.lock().await;
        let leveled_up = state.level.level_up();
        if leveled_up {
            info!("Session {} reached level {}", session_id, state.level.level);
        }
        LevelUpOutcome::new(leveled_up, state.level)
    }

    pub async fn achievements(&self, session_id: &str) -> AchievementsView {
        let Some(session) = self.sessions.get(session_id).await else {
            return AchievementsView {
                achievements: Vec::new(),
                xp: 0,
            };
        };
        let state = session.lock().await;
        AchievementsView {
            achievements: state.achievements.clone(),
            xp: state.xp,
        }
    }

    pub async fn progress(&self, student_id: &str) -> Value {
        self.progress.snapshot(student_id).await
    }

    pub fn challenges(&self) -> Challenges {
        let mut rng = rand::rng();
        Challenges {
            daily: self
                .resources
                .daily_challenges
                .choose(&mut rng)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            weekly: self
                .resources
                .weekly_challenges
                .choose(&mut rng)
                .map(|c| c.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

fn require_text<'a>(value: &'a str, field: &str) -> TutorResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TutorError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}
