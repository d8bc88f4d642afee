// src/state.rs
// Shared application state handed to every HTTP handler

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::tutor::Tutor;

pub const NOT_INITIALIZED: &str = "Chatbot not initialized. Please check server logs.";

#[derive(Clone, Default)]
pub struct AppState {
    /// None when startup credential validation failed
    pub tutor: Option<Arc<Tutor>>,
}

impl AppState {
    pub fn new(tutor: Tutor) -> Self {
        Self {
            tutor: Some(Arc::new(tutor)),
        }
    }

    /// State for a server that came up without a working provider
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn tutor(&self) -> ApiResult<&Tutor> {
        self.tutor
            .as_deref()
            .ok_or_else(|| ApiError::internal(NOT_INITIALIZED))
    }
}
