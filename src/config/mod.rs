// src/config/mod.rs
// Environment-driven configuration, read once at startup

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

use crate::llm::provider::ProviderKind;
use crate::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};
use crate::tutor::{GradingStrategy, TutorConfig};

#[derive(Debug, Clone)]
pub struct EduConfig {
    // ── Provider selection
    pub provider: ProviderKind,

    // ── Groq (OpenAI-compatible)
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,

    // ── Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,

    // ── Generation
    pub temperature: f32,
    pub max_tokens: u32,
    pub history_window: usize,
    pub llm_timeout_secs: u64,
    pub quiz_grading: GradingStrategy,

    // ── Sessions
    pub session_ttl_secs: u64,
    pub max_sessions: usize,

    // ── Server
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Logging
    pub log_level: String,
}

/// Cut a trailing `# comment`. A `#` only starts a comment at the start of
/// the value or after whitespace, so URL fragments survive.
fn strip_comment(val: &str) -> &str {
    let mut prev_ws = true;
    for (i, c) in val.char_indices() {
        if c == '#' && prev_ws {
            return &val[..i];
        }
        prev_ws = c.is_whitespace();
    }
    val
}

/// Parse `key` through `lookup`, dropping trailing `# comments`.
/// Falls back to `default` when missing or unparseable.
fn lookup_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = strip_comment(&val).trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => {
                    eprintln!("Config: {} = {} (from environment)", key, clean_val);
                    parsed
                }
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        None => default,
    }
}

/// Secrets are never echoed
fn lookup_secret<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EduConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            provider: lookup_or(&lookup, "EDUMENTOR_PROVIDER", ProviderKind::Groq),
            groq_api_key: lookup_secret(&lookup, "GROQ_API_KEY"),
            groq_base_url: lookup_or(
                &lookup,
                "GROQ_BASE_URL",
                "https://api.groq.com/openai/v1".to_string(),
            ),
            groq_model: lookup_or(&lookup, "GROQ_MODEL", "llama3-70b-8192".to_string()),
            gemini_api_key: lookup_secret(&lookup, "GEMINI_API_KEY"),
            gemini_base_url: lookup_or(
                &lookup,
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta".to_string(),
            ),
            gemini_model: lookup_or(&lookup, "GEMINI_MODEL", "gemini-1.5-flash".to_string()),
            temperature: lookup_or(&lookup, "EDUMENTOR_TEMPERATURE", 0.4),
            max_tokens: lookup_or(&lookup, "EDUMENTOR_MAX_TOKENS", 1000),
            history_window: lookup_or(&lookup, "EDUMENTOR_HISTORY_WINDOW", 6),
            llm_timeout_secs: lookup_or(&lookup, "EDUMENTOR_LLM_TIMEOUT_SECS", 60),
            quiz_grading: lookup_or(&lookup, "EDUMENTOR_QUIZ_GRADING", GradingStrategy::Verdict),
            session_ttl_secs: lookup_or(
                &lookup,
                "EDUMENTOR_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL.as_secs(),
            ),
            max_sessions: lookup_or(&lookup, "EDUMENTOR_MAX_SESSIONS", DEFAULT_MAX_SESSIONS),
            host: lookup_or(&lookup, "EDUMENTOR_HOST", "0.0.0.0".to_string()),
            port: lookup_or(&lookup, "EDUMENTOR_PORT", 8000),
            cors_origin: lookup_or(&lookup, "EDUMENTOR_CORS_ORIGIN", "*".to_string()),
            log_level: lookup_or(&lookup, "EDUMENTOR_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Settings handed to the tutor at construction
    pub fn tutor_config(&self) -> TutorConfig {
        TutorConfig {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            history_window: self.history_window,
            llm_timeout: self.llm_timeout(),
            grading: self.quiz_grading.clone(),
            session_ttl: Duration::from_secs(self.session_ttl_secs),
            max_sessions: self.max_sessions,
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<EduConfig> = Lazy::new(EduConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> EduConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EduConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.provider, ProviderKind::Groq);
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.groq_model, "llama3-70b-8192");
        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.history_window, 6);
        assert_eq!(config.quiz_grading, GradingStrategy::Verdict);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_overrides_and_comments() {
        let config = config_from(&[
            ("EDUMENTOR_PROVIDER", "gemini"),
            ("EDUMENTOR_PORT", "9100 # local dev"),
            ("EDUMENTOR_HISTORY_WINDOW", "10"),
            ("EDUMENTOR_QUIZ_GRADING", "keyword:correct"),
            ("EDUMENTOR_LOG_LEVEL", "debug"),
        ]);

        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.port, 9100);
        assert_eq!(config.history_window, 10);
        assert_eq!(
            config.quiz_grading,
            GradingStrategy::Keyword("correct".to_string())
        );
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_unparseable_falls_back() {
        let config = config_from(&[
            ("EDUMENTOR_PORT", "not-a-port"),
            ("EDUMENTOR_PROVIDER", "openai"),
        ]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.provider, ProviderKind::Groq);
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = config_from(&[("GROQ_API_KEY", "   "), ("GEMINI_API_KEY", " abc ")]);
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_tutor_config() {
        let config = config_from(&[("EDUMENTOR_LLM_TIMEOUT_SECS", "15")]);
        let tutor = config.tutor_config();
        assert_eq!(tutor.llm_timeout, Duration::from_secs(15));
        assert_eq!(tutor.history_window, 6);
        assert_eq!(tutor.session_ttl, DEFAULT_SESSION_TTL);
        assert_eq!(tutor.max_sessions, DEFAULT_MAX_SESSIONS);
    }

    #[test]
    fn test_hash_inside_value_is_kept() {
        let config = config_from(&[
            ("GROQ_BASE_URL", "https://proxy.local/v1#frag"),
            ("GROQ_MODEL", "llama#70b # pinned"),
            ("EDUMENTOR_PORT", "9100 # local dev"),
        ]);
        assert_eq!(config.groq_base_url, "https://proxy.local/v1#frag");
        assert_eq!(config.groq_model, "llama#70b");
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_session_limits() {
        let config = config_from(&[
            ("EDUMENTOR_SESSION_TTL_SECS", "120"),
            ("EDUMENTOR_MAX_SESSIONS", "50"),
        ]);
        let tutor = config.tutor_config();
        assert_eq!(tutor.session_ttl, Duration::from_secs(120));
        assert_eq!(tutor.max_sessions, 50);
    }
}
