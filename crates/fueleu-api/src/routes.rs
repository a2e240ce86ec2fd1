//! Handlers for `/routes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/routes` | All routes in insertion order |
//! | `POST` | `/routes` | Body: [`NewRoute`]; returns 201 + stored route |
//! | `GET`  | `/routes/:id` | 404 if not found |
//! | `POST` | `/routes/:id/baseline` | Make this route the single baseline |
//! | `GET`  | `/routes/comparison` | Baseline vs all other routes |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use fueleu_core::{
  engine::{ComparisonReport, ComplianceEngine},
  route::{NewRoute, Route},
  store::ComplianceStore,
};
use serde_json::json;

use crate::error::ApiError;

/// `GET /routes`
pub async fn list<S>(
  State(engine): State<ComplianceEngine<S>>,
) -> Result<Json<Vec<Route>>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.list_routes().await?))
}

/// `POST /routes` — returns 201 + the stored [`Route`].
pub async fn create<S>(
  State(engine): State<ComplianceEngine<S>>,
  Json(body): Json<NewRoute>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let route = engine.add_route(body).await?;
  Ok((StatusCode::CREATED, Json(route)))
}

/// `GET /routes/:id`
pub async fn get_one<S>(
  State(engine): State<ComplianceEngine<S>>,
  Path(id): Path<String>,
) -> Result<Json<Route>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.get_route(&id).await?))
}

/// `POST /routes/:id/baseline`
pub async fn set_baseline<S>(
  State(engine): State<ComplianceEngine<S>>,
  Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  engine.set_baseline(&id).await?;
  Ok(Json(json!({ "message": "baseline set", "route_id": id })))
}

/// `GET /routes/comparison`
pub async fn comparison<S>(
  State(engine): State<ComplianceEngine<S>>,
) -> Result<Json<ComparisonReport>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.comparison().await?))
}
