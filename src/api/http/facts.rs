// src/api/http/facts.rs
// GET /facts and POST /facts

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::error::FieldViolation;
use crate::state::AppState;
use crate::store::{NewFact, StoredFact};

/// Body of `POST /facts`. Fields are optional here so that a missing field
/// is reported as a violation rather than a generic decode failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateFactRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

pub async fn list_facts_handler(
    State(app_state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StoredFact>>> {
    let facts = app_state.fact_store.list_facts().await?;
    Ok(Json(facts))
}

pub async fn create_fact_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<CreateFactRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StoredFact>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected fact payload: {}", rejection.body_text());
        ApiError::validation(vec![FieldViolation::new("body", rejection.body_text())])
    })?;

    let new_fact = NewFact::new(request.content, request.source)?;
    let stored = app_state.fact_store.add_fact(new_fact).await?;
    info!(id = stored.id, source = %stored.source, "fact created");

    Ok((StatusCode::CREATED, Json(stored)))
}
