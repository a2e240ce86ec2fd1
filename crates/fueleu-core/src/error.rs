//! Error types for `fueleu-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("route not found: {0}")]
  RouteNotFound(String),

  #[error("no compliance record for ship {ship_id} in year {year}")]
  ComplianceNotFound { ship_id: String, year: i32 },

  #[error("cannot bank non-positive amount: {0}")]
  InvalidAmount(f64),

  #[error("insufficient banked balance: requested {requested}, available {available}")]
  InsufficientBalance { requested: f64, available: f64 },

  #[error("pool total cannot be negative: {0}")]
  NegativePoolTotal(f64),

  #[error("invalid pool member: {0}")]
  InvalidMember(String),

  #[error("no baseline route set")]
  NoBaselineSet,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("storage error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Stable snake_case tag for API error bodies.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::RouteNotFound(_) => "not_found",
      Self::ComplianceNotFound { .. } => "not_found",
      Self::InvalidAmount(_) => "invalid_amount",
      Self::InsufficientBalance { .. } => "insufficient_balance",
      Self::NegativePoolTotal(_) => "negative_pool_total",
      Self::InvalidMember(_) => "invalid_member",
      Self::NoBaselineSet => "no_baseline_set",
      Self::Serialization(_) => "serialization",
      Self::Store(_) => "store",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
