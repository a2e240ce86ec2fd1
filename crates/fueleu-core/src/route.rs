//! Route — one vessel voyage with its fuel and emissions figures.
//!
//! Routes are created by seed/import and mutated only by the baseline
//! toggle; the engine never deletes them.

use serde::{Deserialize, Serialize};

/// A stored route. `route_id` doubles as the ship identifier in the
/// compliance and banking tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
  pub route_id:         String,
  pub vessel_type:      String,
  pub fuel_type:        String,
  pub year:             i32,
  /// Grams of CO2-equivalent per megajoule of energy used.
  pub ghg_intensity:    f64,
  /// Fuel consumed over the route, in tons.
  pub fuel_consumption: f64,
  pub distance:         f64,
  pub total_emissions:  f64,
  /// At most one route carries this flag at any time.
  pub is_baseline:      bool,
}

/// Input to [`crate::store::ComplianceStore::add_route`].
/// New routes never start as the baseline; use the baseline toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoute {
  pub route_id:         String,
  pub vessel_type:      String,
  pub fuel_type:        String,
  pub year:             i32,
  pub ghg_intensity:    f64,
  pub fuel_consumption: f64,
  pub distance:         f64,
  pub total_emissions:  f64,
}

impl NewRoute {
  pub fn into_route(self) -> Route {
    Route {
      route_id:         self.route_id,
      vessel_type:      self.vessel_type,
      fuel_type:        self.fuel_type,
      year:             self.year,
      ghg_intensity:    self.ghg_intensity,
      fuel_consumption: self.fuel_consumption,
      distance:         self.distance,
      total_emissions:  self.total_emissions,
      is_baseline:      false,
    }
  }
}
