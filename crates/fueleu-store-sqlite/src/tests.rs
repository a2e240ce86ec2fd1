//! Integration tests for `SqliteStore` against an in-memory database,
//! plus engine-level tests running the full orchestration path.

use fueleu_core::{
  Error as CoreError,
  banking::NewBankEntry,
  compliance::ComplianceRecord,
  engine::ComplianceEngine,
  pooling::{MemberCb, PoolAllocation},
  route::NewRoute,
  store::ComplianceStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_route(route_id: &str, year: i32, ghg_intensity: f64) -> NewRoute {
  NewRoute {
    route_id:         route_id.into(),
    vessel_type:      "Container".into(),
    fuel_type:        "HFO".into(),
    year,
    ghg_intensity,
    fuel_consumption: 5_000.0,
    distance:         12_000.0,
    total_emissions:  4_500.0,
  }
}

// ─── Routes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_route() {
  let s = store().await;

  let route = s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();
  assert!(!route.is_baseline);

  let fetched = s.get_route("R001").await.unwrap().unwrap();
  assert_eq!(fetched.route_id, "R001");
  assert_eq!(fetched.ghg_intensity, 91.0);
  assert_eq!(fetched.fuel_consumption, 5_000.0);
}

#[tokio::test]
async fn get_route_missing_returns_none() {
  let s = store().await;
  assert!(s.get_route("R404").await.unwrap().is_none());
}

#[tokio::test]
async fn list_routes_preserves_insertion_order() {
  let s = store().await;
  s.add_route(new_route("R003", 2024, 93.5)).await.unwrap();
  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();
  s.add_route(new_route("R002", 2024, 88.0)).await.unwrap();

  let all = s.list_routes().await.unwrap();
  let ids: Vec<_> = all.iter().map(|r| r.route_id.as_str()).collect();
  assert_eq!(ids, ["R003", "R001", "R002"]);
}

#[tokio::test]
async fn duplicate_route_id_errors() {
  let s = store().await;
  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();
  assert!(s.add_route(new_route("R001", 2025, 90.0)).await.is_err());
}

// ─── Baseline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn no_baseline_by_default() {
  let s = store().await;
  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();
  assert!(s.get_baseline().await.unwrap().is_none());
}

#[tokio::test]
async fn set_baseline_is_exclusive() {
  let s = store().await;
  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();
  s.add_route(new_route("R002", 2024, 88.0)).await.unwrap();

  s.set_baseline("R001").await.unwrap();
  assert_eq!(s.get_baseline().await.unwrap().unwrap().route_id, "R001");

  s.set_baseline("R002").await.unwrap();
  assert_eq!(s.get_baseline().await.unwrap().unwrap().route_id, "R002");

  let flagged: Vec<_> = s
    .list_routes()
    .await
    .unwrap()
    .into_iter()
    .filter(|r| r.is_baseline)
    .collect();
  assert_eq!(flagged.len(), 1);
  assert_eq!(flagged[0].route_id, "R002");
}

// ─── Compliance records ──────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_compliance_overwrites() {
  let s = store().await;

  s.upsert_compliance(ComplianceRecord {
    ship_id:  "R001".into(),
    year:     2024,
    cb_value: -50_000.0,
  })
  .await
  .unwrap();

  s.upsert_compliance(ComplianceRecord {
    ship_id:  "R001".into(),
    year:     2024,
    cb_value: -42_000.0,
  })
  .await
  .unwrap();

  let record = s.get_compliance("R001", 2024).await.unwrap().unwrap();
  assert_eq!(record.cb_value, -42_000.0);
}

#[tokio::test]
async fn compliance_is_keyed_by_ship_and_year() {
  let s = store().await;

  s.upsert_compliance(ComplianceRecord {
    ship_id:  "R001".into(),
    year:     2024,
    cb_value: -50_000.0,
  })
  .await
  .unwrap();

  assert!(s.get_compliance("R001", 2025).await.unwrap().is_none());
  assert!(s.get_compliance("R002", 2024).await.unwrap().is_none());
}

// ─── Banking ledger ──────────────────────────────────────────────────────────

#[tokio::test]
async fn record_and_list_bank_entries() {
  let s = store().await;

  let first = s
    .record_bank_entry(NewBankEntry { ship_id: "R002".into(), year: 2024, amount: 10.0 })
    .await
    .unwrap();
  let second = s
    .record_bank_entry(NewBankEntry { ship_id: "R002".into(), year: 2024, amount: 20.0 })
    .await
    .unwrap();

  assert_ne!(first.entry_id, second.entry_id);

  // Newest first.
  let entries = s.list_bank_entries("R002").await.unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0].entry_id, second.entry_id);
  assert_eq!(entries[1].entry_id, first.entry_id);
}

#[tokio::test]
async fn bank_total_filters_by_ship_and_year() {
  let s = store().await;

  for (ship_id, year, amount) in [
    ("R002", 2024, 100.0),
    ("R002", 2024, 50.0),
    ("R002", 2023, 999.0),
    ("R004", 2024, 77.0),
  ] {
    s.record_bank_entry(NewBankEntry {
      ship_id: ship_id.into(),
      year,
      amount,
    })
    .await
    .unwrap();
  }

  assert_eq!(s.bank_total("R002", 2024).await.unwrap(), 150.0);
  assert_eq!(s.bank_total("R002", 2023).await.unwrap(), 999.0);
  assert_eq!(s.bank_total("R004", 2024).await.unwrap(), 77.0);
  assert_eq!(s.bank_total("R001", 2024).await.unwrap(), 0.0);
}

// ─── Pools ───────────────────────────────────────────────────────────────────

fn allocation(ship_id: &str, cb_before: f64, cb_after: f64) -> PoolAllocation {
  PoolAllocation { ship_id: ship_id.into(), cb_before, cb_after }
}

#[tokio::test]
async fn create_and_get_pool_preserves_member_order() {
  let s = store().await;

  let created = s
    .create_pool(2024, vec![
      allocation("B", 120_000.0, 50_000.0),
      allocation("A", -50_000.0, 0.0),
      allocation("C", -20_000.0, 0.0),
    ])
    .await
    .unwrap();

  let fetched = s.get_pool(created.pool_id).await.unwrap().unwrap();
  assert_eq!(fetched.year, 2024);

  let ids: Vec<_> = fetched.members.iter().map(|m| m.ship_id.as_str()).collect();
  assert_eq!(ids, ["B", "A", "C"]);
  assert_eq!(fetched.members[0].cb_before, 120_000.0);
  assert_eq!(fetched.members[0].cb_after, 50_000.0);
}

#[tokio::test]
async fn get_pool_missing_returns_none() {
  let s = store().await;
  assert!(s.get_pool(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_pools_newest_first() {
  let s = store().await;

  let first = s
    .create_pool(2024, vec![allocation("A", 10.0, 10.0)])
    .await
    .unwrap();
  let second = s
    .create_pool(2025, vec![allocation("B", 20.0, 20.0)])
    .await
    .unwrap();

  let pools = s.list_pools().await.unwrap();
  assert_eq!(pools.len(), 2);
  assert_eq!(pools[0].pool_id, second.pool_id);
  assert_eq!(pools[1].pool_id, first.pool_id);
}

// ─── Engine orchestration ────────────────────────────────────────────────────

#[tokio::test]
async fn engine_compute_cb_upserts_record() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());

  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();

  let result = engine.compute_cb("R001").await.unwrap();
  assert!(result.cb < 0.0);

  let record = s.get_compliance("R001", 2024).await.unwrap().unwrap();
  assert_eq!(record.cb_value, result.cb);

  // Second run overwrites the same row.
  engine.compute_cb("R001").await.unwrap();
  assert!(s.get_compliance("R001", 2024).await.unwrap().is_some());
}

#[tokio::test]
async fn engine_compute_cb_unknown_route() {
  let engine = ComplianceEngine::new(store().await);
  let err = engine.compute_cb("R404").await.unwrap_err();
  assert!(matches!(err, CoreError::RouteNotFound(id) if id == "R404"));
}

#[tokio::test]
async fn engine_adjusted_cb_adds_year_bank_total() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());

  s.upsert_compliance(ComplianceRecord {
    ship_id:  "R002".into(),
    year:     2024,
    cb_value: 120_000.0,
  })
  .await
  .unwrap();
  engine
    .bank_surplus(NewBankEntry { ship_id: "R002".into(), year: 2024, amount: 5_000.0 })
    .await
    .unwrap();
  engine
    .bank_surplus(NewBankEntry { ship_id: "R002".into(), year: 2023, amount: 999.0 })
    .await
    .unwrap();

  let adjusted = engine.adjusted_cb("R002", 2024).await.unwrap();
  assert_eq!(adjusted.base_cb, 120_000.0);
  assert_eq!(adjusted.bank_total, 5_000.0);
  assert_eq!(adjusted.cb, 125_000.0);
}

#[tokio::test]
async fn engine_adjusted_cb_missing_record() {
  let engine = ComplianceEngine::new(store().await);
  let err = engine.adjusted_cb("R001", 2024).await.unwrap_err();
  assert!(matches!(
    err,
    CoreError::ComplianceNotFound { ship_id, year } if ship_id == "R001" && year == 2024
  ));
}

#[tokio::test]
async fn engine_bank_validates_before_writing() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());

  let err = engine
    .bank_surplus(NewBankEntry { ship_id: "R002".into(), year: 2024, amount: -5.0 })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::InvalidAmount(_)));
  assert!(s.list_bank_entries("R002").await.unwrap().is_empty());
}

#[tokio::test]
async fn engine_create_pool_persists_snapshot() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());

  let outcome = engine
    .create_pool(2024, vec![
      MemberCb { ship_id: "A".into(), cb: -50_000.0 },
      MemberCb { ship_id: "B".into(), cb: 120_000.0 },
      MemberCb { ship_id: "C".into(), cb: -20_000.0 },
    ])
    .await
    .unwrap();

  assert_eq!(outcome.pool_sum, 50_000.0);

  let stored = s.get_pool(outcome.pool_id).await.unwrap().unwrap();
  let ids: Vec<_> = stored.members.iter().map(|m| m.ship_id.as_str()).collect();
  assert_eq!(ids, ["B", "A", "C"]);
}

#[tokio::test]
async fn engine_rejected_pool_writes_nothing() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());

  let err = engine
    .create_pool(2024, vec![
      MemberCb { ship_id: "A".into(), cb: 10.0 },
      MemberCb { ship_id: "B".into(), cb: -11.0 },
    ])
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::NegativePoolTotal(_)));
  assert!(s.list_pools().await.unwrap().is_empty());
}

#[tokio::test]
async fn engine_comparison_requires_baseline() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());
  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();

  let err = engine.comparison().await.unwrap_err();
  assert!(matches!(err, CoreError::NoBaselineSet));
}

#[tokio::test]
async fn engine_comparison_excludes_baseline_route() {
  let s = store().await;
  let engine = ComplianceEngine::new(s.clone());

  s.add_route(new_route("R001", 2024, 91.0)).await.unwrap();
  s.add_route(new_route("R002", 2024, 88.0)).await.unwrap();
  s.add_route(new_route("R003", 2024, 93.5)).await.unwrap();
  engine.set_baseline("R001").await.unwrap();

  let report = engine.comparison().await.unwrap();
  assert_eq!(report.baseline.route_id, "R001");

  let ids: Vec<_> = report.comparison.iter().map(|r| r.route_id.as_str()).collect();
  assert_eq!(ids, ["R002", "R003"]);
  assert!(report.comparison[0].compliant);
  assert!(!report.comparison[1].compliant);
}

#[tokio::test]
async fn engine_set_baseline_unknown_route() {
  let engine = ComplianceEngine::new(store().await);
  let err = engine.set_baseline("R404").await.unwrap_err();
  assert!(matches!(err, CoreError::RouteNotFound(_)));
}
