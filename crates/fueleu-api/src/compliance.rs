//! Handlers for `/compliance` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/compliance/cb?route_id=...` | Compute + upsert the route's CB |
//! | `GET`  | `/compliance/adjusted?ship_id=...&year=...` | Base CB + banked total |

use axum::{
  Json,
  extract::{Query, State},
};
use fueleu_core::{
  compliance::{AdjustedCb, ComplianceResult},
  engine::ComplianceEngine,
  store::ComplianceStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ComputeParams {
  pub route_id: String,
}

/// `GET /compliance/cb?route_id=<id>`
pub async fn compute_cb<S>(
  State(engine): State<ComplianceEngine<S>>,
  Query(params): Query<ComputeParams>,
) -> Result<Json<ComplianceResult>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.compute_cb(&params.route_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct AdjustedParams {
  pub ship_id: String,
  pub year:    i32,
}

/// `GET /compliance/adjusted?ship_id=<id>&year=<year>`
pub async fn adjusted_cb<S>(
  State(engine): State<ComplianceEngine<S>>,
  Query(params): Query<AdjustedParams>,
) -> Result<Json<AdjustedCb>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.adjusted_cb(&params.ship_id, params.year).await?))
}
