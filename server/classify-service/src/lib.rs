//! Update Classification Service
//!
//! HTTP service exposing the dependency-update classifier.
//! Bind to 127.0.0.1 by default (internal only).

mod handlers;
mod state;
mod types;

pub use handlers::{classify, classify_batch, health};
pub use state::AppState;
pub use types::BatchRequest;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router with all routes and layers.
pub fn app(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/classify", post(classify))
    .route("/classify/batch", post(classify_batch))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
