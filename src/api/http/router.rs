// src/api/http/router.rs
// HTTP router composition for the facts API

use axum::{Router, http::Method, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{
    facts::{create_fact_handler, list_facts_handler},
    handlers::health_handler,
};
use crate::state::AppState;

/// Fact routes, mounted both at the root and under /api
pub fn facts_router() -> Router<Arc<AppState>> {
    Router::new().route("/facts", get(list_facts_handler).post(create_fact_handler))
}

/// Create the full application router
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_handler))
        // Facts
        .merge(facts_router())
        .nest("/api", facts_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
