// src/api/http/handlers.rs

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;

/// Health check handler
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "store": app_state.fact_store.backend_name(),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
