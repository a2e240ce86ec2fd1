//! JSON REST API for the FuelEU compliance engine.
//!
//! Exposes an axum [`Router`] backed by a [`ComplianceEngine`] over any
//! [`fueleu_core::store::ComplianceStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fueleu_api::api_router(engine.clone()))
//! ```

pub mod banking;
pub mod compliance;
pub mod error;
pub mod pooling;
pub mod routes;

use axum::{
  Router,
  routing::{get, post},
};
use fueleu_core::{engine::ComplianceEngine, store::ComplianceStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(engine: ComplianceEngine<S>) -> Router<()>
where
  S: ComplianceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Routes
    .route("/routes", get(routes::list::<S>).post(routes::create::<S>))
    .route("/routes/comparison", get(routes::comparison::<S>))
    .route("/routes/{id}", get(routes::get_one::<S>))
    .route("/routes/{id}/baseline", post(routes::set_baseline::<S>))
    // Compliance
    .route("/compliance/cb", get(compliance::compute_cb::<S>))
    .route("/compliance/adjusted", get(compliance::adjusted_cb::<S>))
    // Banking
    .route("/banking", get(banking::records::<S>))
    .route("/banking/bank", post(banking::bank::<S>))
    .route("/banking/apply", post(banking::apply::<S>))
    // Pools
    .route("/pools", get(pooling::list::<S>).post(pooling::create::<S>))
    .with_state(engine)
}
