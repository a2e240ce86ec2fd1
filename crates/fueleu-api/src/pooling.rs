//! Handlers for `/pools` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/pools` | Persisted pooling events, newest first |
//! | `POST` | `/pools` | Body: [`CreatePoolBody`]; runs one allocation |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use fueleu_core::{
  engine::ComplianceEngine,
  pooling::{MemberCb, PoolRecord},
  store::ComplianceStore,
};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /pools`
pub async fn list<S>(
  State(engine): State<ComplianceEngine<S>>,
) -> Result<Json<Vec<PoolRecord>>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.list_pools().await?))
}

/// JSON body accepted by `POST /pools`.
#[derive(Debug, Deserialize)]
pub struct CreatePoolBody {
  pub year:    i32,
  pub members: Vec<MemberCb>,
}

/// `POST /pools` — returns 201 + the allocation snapshot and pool sum.
pub async fn create<S>(
  State(engine): State<ComplianceEngine<S>>,
  Json(body): Json<CreatePoolBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let outcome = engine.create_pool(body.year, body.members).await?;
  Ok((StatusCode::CREATED, Json(outcome)))
}
