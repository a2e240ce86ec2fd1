//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Carries the domain error kind so
/// response bodies stay machine-matchable.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
  pub status:  StatusCode,
  pub kind:    &'static str,
  pub message: String,
}

impl From<fueleu_core::Error> for ApiError {
  fn from(e: fueleu_core::Error) -> Self {
    use fueleu_core::Error as E;

    let status = match &e {
      E::RouteNotFound(_) | E::ComplianceNotFound { .. } | E::NoBaselineSet => {
        StatusCode::NOT_FOUND
      }
      E::InvalidAmount(_) | E::InvalidMember(_) => StatusCode::BAD_REQUEST,
      E::InsufficientBalance { .. } | E::NegativePoolTotal(_) => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
      E::Serialization(_) | E::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    ApiError { status, kind: e.kind(), message: e.to_string() }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (
      self.status,
      Json(json!({ "error": self.message, "kind": self.kind })),
    )
      .into_response()
  }
}
