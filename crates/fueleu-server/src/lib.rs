//! FuelEU compliance server — configuration and router assembly.

pub mod seed;

use axum::{Router, routing::get};
use fueleu_core::{engine::ComplianceEngine, store::ComplianceStore};
use serde::Deserialize;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `FUELEU_*` environment overrides.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       4000,
      store_path: PathBuf::from("fueleu.db"),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: health check at `/`, the JSON API
/// nested under `/api`, request tracing on everything.
pub fn app<S>(engine: ComplianceEngine<S>) -> Router
where
  S: ComplianceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(health))
    .nest("/api", fueleu_api::api_router(engine))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
  "FuelEU compliance engine running"
}

// ─── Integration tests ────────────────────────────────────────────────────────
