// src/api/http/mod.rs

pub mod chat;
pub mod gamification;
pub mod generate;
pub mod handlers;
pub mod router;
pub mod session;

pub use router::create_router;
pub use session::{SESSION_HEADER, SessionId};
