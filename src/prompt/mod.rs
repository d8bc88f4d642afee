// src/prompt/mod.rs

pub mod builder;

pub use builder::{ANTI_REPETITION_RULE, ContextAssembler, DEFAULT_HISTORY_WINDOW};
