// src/session.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

use crate::llm::Message;
use crate::progress::{Action, LevelState};
use crate::resources::Subject;

/// One caller's conversation plus its gamification counters
#[derive(Debug, Clone)]
pub struct SessionState {
    pub study_status: String,
    pub current_subject: Option<Subject>,
    pub xp: u64,
    /// Badge names; set semantics, insertion order kept
    pub achievements: Vec<String>,
    pub chat_history: Vec<Message>,
    pub level: LevelState,
    /// Quiz question awaiting the student's answer
    pub pending_quiz: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            study_status: "active".to_string(),
            current_subject: None,
            xp: 0,
            achievements: Vec::new(),
            chat_history: Vec::new(),
            level: LevelState::default(),
            pending_quiz: None,
        }
    }

    /// Returns true if the badge was newly added
    pub fn add_achievement(&mut self, badge: &str) -> bool {
        if self.achievements.iter().any(|a| a == badge) {
            return false;
        }
        self.achievements.push(badge.to_string());
        true
    }

    /// XP is additive on every call; the badge lands once
    pub fn apply(&mut self, action: Action) {
        self.xp += action.xp();
        self.level.add_points(action.xp());
        self.add_achievement(action.badge());
    }

    pub fn record_turn(&mut self, user: &str, reply: &str) {
        self.chat_history.push(Message::user(user));
        self.chat_history.push(Message::assistant(reply));
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// One session: its state plus a turn lock that keeps chat turns sequential.
/// The state lock is only held for short reads and commits.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
    turn: Mutex<()>,
}

impl Session {
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    /// Held for the whole of a chat turn, including the upstream round trip
    pub async fn begin_turn(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }
}

#[derive(Debug)]
struct SessionEntry {
    session: Arc<Session>,
    last_seen: Instant,
}

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Sessions keyed by caller-supplied id. Idle sessions expire after `idle_ttl`
/// and the least recently seen one is evicted once `max_sessions` is reached.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }

    pub fn with_limits(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Fetch a session without creating it
    pub async fn get(&self, session_id: &str) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(session_id)?;
        if entry.last_seen.elapsed() >= self.idle_ttl {
            debug!("Session {} expired", session_id);
            sessions.remove(session_id);
            return None;
        }
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    /// Fetch a session, creating it on first use
    pub async fn get_or_create(&self, session_id: &str) -> Arc<Session> {
        let mut sessions = self.sessions.lock().await;

        if let Some(entry) = sessions.get_mut(session_id) {
            if entry.last_seen.elapsed() < self.idle_ttl {
                entry.last_seen = Instant::now();
                return entry.session.clone();
            }
        }

        let idle_ttl = self.idle_ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < idle_ttl);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            debug!("Evicting session {}", oldest);
            sessions.remove(&oldest);
        }

        debug!("Creating session {}", session_id);
        let session = Arc::new(Session::default());
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        session
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a new random session ID (UUID v4)
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}
