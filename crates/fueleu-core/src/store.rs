//! The `ComplianceStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `fueleu-store-sqlite`). The engine and the HTTP layer depend on this
//! abstraction, not on any concrete backend. Backends own durability;
//! domain decisions stay in [`crate::engine`].
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  banking::{BankEntry, NewBankEntry},
  compliance::ComplianceRecord,
  pooling::{PoolAllocation, PoolRecord},
  route::{NewRoute, Route},
};

pub trait ComplianceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Routes ────────────────────────────────────────────────────────────

  /// Persist a new route. Fails on a duplicate `route_id`.
  fn add_route(
    &self,
    input: NewRoute,
  ) -> impl Future<Output = Result<Route, Self::Error>> + Send + '_;

  /// Retrieve a route by id. Returns `None` if not found.
  fn get_route<'a>(
    &'a self,
    route_id: &'a str,
  ) -> impl Future<Output = Result<Option<Route>, Self::Error>> + Send + 'a;

  /// List all routes in insertion order.
  fn list_routes(
    &self,
  ) -> impl Future<Output = Result<Vec<Route>, Self::Error>> + Send + '_;

  /// Clear the previous baseline flag and set it on `route_id`, as one
  /// atomic step. Callers verify the route exists first.
  fn set_baseline<'a>(
    &'a self,
    route_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// The route currently flagged as baseline, if any.
  fn get_baseline(
    &self,
  ) -> impl Future<Output = Result<Option<Route>, Self::Error>> + Send + '_;

  // ── Compliance records ────────────────────────────────────────────────

  /// Insert or overwrite the record keyed by `(ship_id, year)`.
  fn upsert_compliance(
    &self,
    record: ComplianceRecord,
  ) -> impl Future<Output = Result<ComplianceRecord, Self::Error>> + Send + '_;

  /// Retrieve the record for `(ship_id, year)`. Returns `None` if absent.
  fn get_compliance<'a>(
    &'a self,
    ship_id: &'a str,
    year: i32,
  ) -> impl Future<Output = Result<Option<ComplianceRecord>, Self::Error>> + Send + 'a;

  // ── Banking ledger — append-only writes ───────────────────────────────

  /// Append a ledger row. `entry_id` and `created_at` are set by the
  /// store.
  fn record_bank_entry(
    &self,
    input: NewBankEntry,
  ) -> impl Future<Output = Result<BankEntry, Self::Error>> + Send + '_;

  /// All ledger rows for a ship, newest first.
  fn list_bank_entries<'a>(
    &'a self,
    ship_id: &'a str,
  ) -> impl Future<Output = Result<Vec<BankEntry>, Self::Error>> + Send + 'a;

  /// Sum of ledger amounts for `(ship_id, year)`.
  fn bank_total<'a>(
    &'a self,
    ship_id: &'a str,
    year: i32,
  ) -> impl Future<Output = Result<f64, Self::Error>> + Send + 'a;

  // ── Pools ─────────────────────────────────────────────────────────────

  /// Persist one allocation run as an immutable pool with its member
  /// snapshots, in one atomic step.
  fn create_pool(
    &self,
    year: i32,
    members: Vec<PoolAllocation>,
  ) -> impl Future<Output = Result<PoolRecord, Self::Error>> + Send + '_;

  /// Retrieve one pool with its members. Returns `None` if not found.
  fn get_pool(
    &self,
    pool_id: Uuid,
  ) -> impl Future<Output = Result<Option<PoolRecord>, Self::Error>> + Send + '_;

  /// All pools, newest first, members in stored order.
  fn list_pools(
    &self,
  ) -> impl Future<Output = Result<Vec<PoolRecord>, Self::Error>> + Send + '_;
}
