// src/api/mod.rs
// HTTP surface: router, handlers and error responses

pub mod error;
pub mod http;

pub use error::{ApiError, ApiResult};
pub use http::create_router;
