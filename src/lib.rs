// src/lib.rs

pub mod api;
pub mod config;
pub mod llm;
pub mod persona;
pub mod progress;
pub mod prompt;
pub mod resources;
pub mod session;
pub mod state;
pub mod tutor;

pub use state::AppState;
pub use tutor::{Tutor, TutorConfig, TutorError};
