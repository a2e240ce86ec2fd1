//! [`ComplianceEngine`] — the orchestrator tying the pure calculators to
//! a [`ComplianceStore`] backend.
//!
//! The engine holds no state beyond the injected store handle; every
//! method reads its inputs, computes, issues writes, and returns.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  banking::{BankApplication, BankEntry, NewBankEntry, apply_banked},
  comparison::{RouteComparison, compare_routes},
  compliance::{AdjustedCb, ComplianceRecord, ComplianceResult, compute_cb},
  pooling::{MemberCb, PoolAllocation, allocate, pool_sum},
  route::{NewRoute, Route},
  store::ComplianceStore,
};

// ─── Result envelopes ────────────────────────────────────────────────────────

/// Baseline plus one comparison row per non-baseline route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
  pub baseline:   Route,
  pub comparison: Vec<RouteComparison>,
}

/// The API-visible outcome of one pooling event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolOutcome {
  pub pool_id:  uuid::Uuid,
  pub year:     i32,
  pub pool:     Vec<PoolAllocation>,
  pub pool_sum: f64,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Orchestrates CB computation, banking, comparison, and pooling against
/// an injected store. Cloning is as cheap as cloning the store handle.
#[derive(Clone)]
pub struct ComplianceEngine<S> {
  store: S,
}

impl<S> ComplianceEngine<S>
where
  S: ComplianceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  pub fn new(store: S) -> Self {
    Self { store }
  }

  fn store_err(e: S::Error) -> Error {
    Error::Store(Box::new(e))
  }

  // ── Routes ────────────────────────────────────────────────────────────

  pub async fn add_route(&self, input: NewRoute) -> Result<Route> {
    self.store.add_route(input).await.map_err(Self::store_err)
  }

  pub async fn list_routes(&self) -> Result<Vec<Route>> {
    self.store.list_routes().await.map_err(Self::store_err)
  }

  pub async fn get_route(&self, route_id: &str) -> Result<Route> {
    self
      .store
      .get_route(route_id)
      .await
      .map_err(Self::store_err)?
      .ok_or_else(|| Error::RouteNotFound(route_id.to_owned()))
  }

  /// Make `route_id` the single baseline route.
  ///
  /// The clear-then-set pair is atomic inside the store; the existence
  /// check here is what turns an unknown id into `RouteNotFound` before
  /// anything is touched.
  pub async fn set_baseline(&self, route_id: &str) -> Result<()> {
    self.get_route(route_id).await?;
    self
      .store
      .set_baseline(route_id)
      .await
      .map_err(Self::store_err)?;
    tracing::info!(route_id, "baseline route set");
    Ok(())
  }

  // ── Compliance ────────────────────────────────────────────────────────

  /// Compute a route's CB and upsert the result as the authoritative
  /// base CB for `(route_id, year)`.
  pub async fn compute_cb(&self, route_id: &str) -> Result<ComplianceResult> {
    let route = self.get_route(route_id).await?;
    let result = compute_cb(&route);

    self
      .store
      .upsert_compliance(ComplianceRecord {
        ship_id:  result.route_id.clone(),
        year:     result.year,
        cb_value: result.cb,
      })
      .await
      .map_err(Self::store_err)?;

    Ok(result)
  }

  /// Base CB plus the ship-year's banked total.
  pub async fn adjusted_cb(&self, ship_id: &str, year: i32) -> Result<AdjustedCb> {
    let record = self
      .store
      .get_compliance(ship_id, year)
      .await
      .map_err(Self::store_err)?
      .ok_or_else(|| Error::ComplianceNotFound {
        ship_id: ship_id.to_owned(),
        year,
      })?;

    let bank_total = self
      .store
      .bank_total(ship_id, year)
      .await
      .map_err(Self::store_err)?;

    Ok(AdjustedCb {
      ship_id:    record.ship_id,
      year:       record.year,
      base_cb:    record.cb_value,
      bank_total,
      cb:         record.cb_value + bank_total,
    })
  }

  // ── Banking ───────────────────────────────────────────────────────────

  pub async fn bank_surplus(&self, input: NewBankEntry) -> Result<BankEntry> {
    input.validate()?;
    self
      .store
      .record_bank_entry(input)
      .await
      .map_err(Self::store_err)
  }

  /// Spend banked CB for `(ship_id, year)`. Read-derived only: no debit
  /// row is written, so the ledger balance is unchanged afterwards.
  pub async fn apply_banked(
    &self,
    ship_id: &str,
    year: i32,
    amount: f64,
  ) -> Result<BankApplication> {
    let available = self
      .store
      .bank_total(ship_id, year)
      .await
      .map_err(Self::store_err)?;
    apply_banked(amount, available)
  }

  pub async fn bank_records(&self, ship_id: &str) -> Result<Vec<BankEntry>> {
    self
      .store
      .list_bank_entries(ship_id)
      .await
      .map_err(Self::store_err)
  }

  // ── Comparison ────────────────────────────────────────────────────────

  pub async fn comparison(&self) -> Result<ComparisonReport> {
    let baseline = self
      .store
      .get_baseline()
      .await
      .map_err(Self::store_err)?
      .ok_or(Error::NoBaselineSet)?;

    let others: Vec<Route> = self
      .store
      .list_routes()
      .await
      .map_err(Self::store_err)?
      .into_iter()
      .filter(|r| !r.is_baseline)
      .collect();

    let comparison = compare_routes(&baseline, &others);
    Ok(ComparisonReport { baseline, comparison })
  }

  // ── Pooling ───────────────────────────────────────────────────────────

  /// Run one pooling event and persist it. Validation happens before any
  /// write, so a rejected pool leaves no row behind.
  pub async fn create_pool(
    &self,
    year: i32,
    members: Vec<MemberCb>,
  ) -> Result<PoolOutcome> {
    let allocations = allocate(&members)?;

    let record = self
      .store
      .create_pool(year, allocations)
      .await
      .map_err(Self::store_err)?;

    let sum = pool_sum(&record.members);
    tracing::info!(pool_id = %record.pool_id, year, members = record.members.len(), "pool created");

    Ok(PoolOutcome {
      pool_id:  record.pool_id,
      year:     record.year,
      pool:     record.members,
      pool_sum: sum,
    })
  }

  pub async fn list_pools(&self) -> Result<Vec<crate::pooling::PoolRecord>> {
    self.store.list_pools().await.map_err(Self::store_err)
  }
}
