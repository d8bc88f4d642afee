// src/api/mod.rs
// HTTP surface: error mapping plus the axum router and handlers

pub mod error;
pub mod http;

pub use error::{ApiError, ApiResult};
pub use http::create_router;
