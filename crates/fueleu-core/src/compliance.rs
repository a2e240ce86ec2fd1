//! Compliance-balance computation.
//!
//! The compliance balance (CB) of a route is the signed distance between
//! the regulatory intensity target and the route's actual GHG intensity,
//! scaled by the energy the route consumed. Positive CB is surplus,
//! negative is deficit.

use serde::{Deserialize, Serialize};

use crate::route::Route;

/// Regulatory GHG intensity target, gCO2e/MJ.
pub const TARGET_INTENSITY: f64 = 89.3368;

/// Energy content of one ton of fuel, MJ.
pub const ENERGY_FACTOR: f64 = 41_000.0;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Sign of a compliance balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CbStatus {
  Surplus,
  Deficit,
  Neutral,
}

impl CbStatus {
  pub fn from_cb(cb: f64) -> Self {
    if cb > 0.0 {
      Self::Surplus
    } else if cb < 0.0 {
      Self::Deficit
    } else {
      Self::Neutral
    }
  }
}

// ─── Computation ─────────────────────────────────────────────────────────────

/// The result of one CB computation for a route-year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResult {
  pub route_id: String,
  pub year:     i32,
  /// Energy used over the route, MJ.
  pub energy:   f64,
  pub cb:       f64,
  pub status:   CbStatus,
}

/// Compute the compliance balance for a route. Pure arithmetic; the
/// caller is responsible for the route existing.
pub fn compute_cb(route: &Route) -> ComplianceResult {
  let energy = route.fuel_consumption * ENERGY_FACTOR;
  let cb = (TARGET_INTENSITY - route.ghg_intensity) * energy;

  ComplianceResult {
    route_id: route.route_id.clone(),
    year:     route.year,
    energy,
    cb,
    status:   CbStatus::from_cb(cb),
  }
}

// ─── Persisted records ───────────────────────────────────────────────────────

/// The authoritative base CB for a ship-year, before banking adjustments.
/// Unique on `(ship_id, year)`; overwritten by each recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRecord {
  pub ship_id:  String,
  pub year:     i32,
  pub cb_value: f64,
}

/// Base CB plus the ship-year's banked total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustedCb {
  pub ship_id:    String,
  pub year:       i32,
  pub base_cb:    f64,
  pub bank_total: f64,
  pub cb:         f64,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
