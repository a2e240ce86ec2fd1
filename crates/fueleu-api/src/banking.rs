//! Handlers for `/banking` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/banking?ship_id=...` | Ledger rows, newest first |
//! | `POST` | `/banking/bank` | Body: [`NewBankEntry`]; 201 + stored row |
//! | `POST` | `/banking/apply` | Body: [`ApplyBody`]; read-derived outcome |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use fueleu_core::{
  banking::{BankApplication, BankEntry, NewBankEntry},
  engine::ComplianceEngine,
  store::ComplianceStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RecordsParams {
  pub ship_id: String,
}

/// `GET /banking?ship_id=<id>`
pub async fn records<S>(
  State(engine): State<ComplianceEngine<S>>,
  Query(params): Query<RecordsParams>,
) -> Result<Json<Vec<BankEntry>>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(engine.bank_records(&params.ship_id).await?))
}

/// `POST /banking/bank` — returns 201 + the appended ledger row.
pub async fn bank<S>(
  State(engine): State<ComplianceEngine<S>>,
  Json(body): Json<NewBankEntry>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entry = engine.bank_surplus(body).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}

/// JSON body accepted by `POST /banking/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyBody {
  pub ship_id: String,
  pub year:    i32,
  pub amount:  f64,
}

/// `POST /banking/apply`
pub async fn apply<S>(
  State(engine): State<ComplianceEngine<S>>,
  Json(body): Json<ApplyBody>,
) -> Result<Json<BankApplication>, ApiError>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let outcome = engine
    .apply_banked(&body.ship_id, body.year, body.amount)
    .await?;
  Ok(Json(outcome))
}
