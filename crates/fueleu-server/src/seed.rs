//! Demo fixtures — the five sample routes and two years of ship
//! compliance data used by the dashboard walkthrough.

use fueleu_core::{
  compliance::ComplianceRecord, route::NewRoute, store::ComplianceStore as _,
};
use fueleu_store_sqlite::SqliteStore;

fn demo_routes() -> Vec<NewRoute> {
  let route = |route_id: &str,
               vessel_type: &str,
               fuel_type: &str,
               year: i32,
               ghg_intensity: f64,
               fuel_consumption: f64,
               distance: f64,
               total_emissions: f64| {
    NewRoute {
      route_id: route_id.into(),
      vessel_type: vessel_type.into(),
      fuel_type: fuel_type.into(),
      year,
      ghg_intensity,
      fuel_consumption,
      distance,
      total_emissions,
    }
  };

  vec![
    route("R001", "Container", "HFO", 2024, 91.0, 5000.0, 12000.0, 4500.0),
    route("R002", "BulkCarrier", "LNG", 2024, 88.0, 4800.0, 11500.0, 4200.0),
    route("R003", "Tanker", "MGO", 2024, 93.5, 5100.0, 12500.0, 4700.0),
    route("R004", "RoRo", "HFO", 2025, 89.2, 4900.0, 11800.0, 4300.0),
    route("R005", "Container", "LNG", 2025, 90.5, 4950.0, 11900.0, 4400.0),
  ]
}

fn demo_compliance() -> Vec<ComplianceRecord> {
  let record = |ship_id: &str, year: i32, cb_value: f64| ComplianceRecord {
    ship_id: ship_id.into(),
    year,
    cb_value,
  };

  vec![
    record("R001", 2024, -50_000.0),
    record("R002", 2024, 120_000.0),
    record("R003", 2024, -20_000.0),
    record("R004", 2024, 80_000.0),
    record("R005", 2024, -30_000.0),
    record("R001", 2025, -45_000.0),
    record("R002", 2025, 110_000.0),
    record("R003", 2025, -25_000.0),
    record("R004", 2025, 75_000.0),
    record("R005", 2025, -35_000.0),
  ]
}

/// Wipe the store and load the demo data set.
pub async fn seed(store: &SqliteStore) -> fueleu_store_sqlite::Result<()> {
  store.reset().await?;

  for route in demo_routes() {
    store.add_route(route).await?;
  }
  for record in demo_compliance() {
    store.upsert_compliance(record).await?;
  }

  tracing::info!("seeded demo routes and compliance records");
  Ok(())
}
