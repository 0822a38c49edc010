//! HTTP handlers for the classification service.

use axum::{extract::State, Json};
use std::sync::Arc;
use update_classifier::{Request, Response};

use crate::state::AppState;
use crate::types::BatchRequest;

pub async fn health() -> &'static str {
  "ok"
}

pub async fn classify(
  State(state): State<Arc<AppState>>,
  Json(req): Json<Request>,
) -> Json<Response> {
  let resp = update_classifier::classify(&req, &state.policy);
  tracing::info!(
    decision_id = %resp.decision_id,
    package = %resp.package_name,
    risk_score = resp.risk_score,
    "classify"
  );
  Json(resp)
}

pub async fn classify_batch(
  State(state): State<Arc<AppState>>,
  Json(batch): Json<BatchRequest>,
) -> Json<Vec<Response>> {
  let out: Vec<Response> = batch
    .into_requests()
    .iter()
    .map(|req| update_classifier::classify(req, &state.policy))
    .collect();
  tracing::info!(count = out.len(), "classify batch");
  Json(out)
}
