//! Binary entrypoint for the classification service.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Level;

use classify_service::AppState;
use update_classifier::{telemetry, Policy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let json_logs = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
  telemetry::init_tracing(json_logs, Level::INFO);

  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5005".into())
    .parse()
    .context("PORT must be a valid u16")?;

  let policy = match std::env::var("POLICY_PATH") {
    Ok(path) => Policy::from_json_file(&path).with_context(|| format!("loading policy {}", path))?,
    Err(_) => Policy::default(),
  };

  let state = Arc::new(AppState { policy });
  let app = classify_service::app(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  tracing::info!("classify-service listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
