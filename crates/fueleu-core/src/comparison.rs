//! Baseline comparison — percentage deviation of each route's GHG
//! intensity from the designated baseline route and the fixed target.

use serde::{Deserialize, Serialize};

use crate::{compliance::TARGET_INTENSITY, route::Route};

/// One comparison row for a non-baseline route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteComparison {
  pub route_id:             String,
  pub baseline_intensity:   f64,
  pub comparison_intensity: f64,
  /// Signed deviation from the baseline intensity, in percent.
  pub percent_diff:         f64,
  /// Whether the route meets the fixed regulatory target.
  pub compliant:            bool,
}

/// Compare `others` against `baseline`, preserving input order.
pub fn compare_routes(baseline: &Route, others: &[Route]) -> Vec<RouteComparison> {
  others
    .iter()
    .map(|route| RouteComparison {
      route_id:             route.route_id.clone(),
      baseline_intensity:   baseline.ghg_intensity,
      comparison_intensity: route.ghg_intensity,
      percent_diff:         (route.ghg_intensity / baseline.ghg_intensity - 1.0)
        * 100.0,
      compliant:            route.ghg_intensity <= TARGET_INTENSITY,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn route(route_id: &str, ghg_intensity: f64) -> Route {
    Route {
      route_id:         route_id.into(),
      vessel_type:      "Container".into(),
      fuel_type:        "HFO".into(),
      year:             2024,
      ghg_intensity,
      fuel_consumption: 5_000.0,
      distance:         12_000.0,
      total_emissions:  4_500.0,
      is_baseline:      false,
    }
  }

  #[test]
  fn percent_diff_against_baseline() {
    let baseline = route("R001", 91.0);
    let rows = compare_routes(&baseline, &[route("R002", 88.0)]);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.baseline_intensity, 91.0);
    assert_eq!(row.comparison_intensity, 88.0);
    assert!((row.percent_diff - -3.2967).abs() < 1e-3, "{}", row.percent_diff);
    assert!(row.compliant);
  }

  #[test]
  fn above_target_is_not_compliant() {
    let baseline = route("R001", 91.0);
    let rows = compare_routes(&baseline, &[route("R003", 93.5)]);
    assert!(!rows[0].compliant);
    assert!(rows[0].percent_diff > 0.0);
  }

  #[test]
  fn exactly_at_target_is_compliant() {
    let baseline = route("R001", 91.0);
    let rows = compare_routes(&baseline, &[route("R004", TARGET_INTENSITY)]);
    assert!(rows[0].compliant);
  }

  #[test]
  fn input_order_is_preserved() {
    let baseline = route("R001", 91.0);
    let others = vec![route("R003", 93.5), route("R002", 88.0), route("R005", 90.5)];
    let rows = compare_routes(&baseline, &others);

    let ids: Vec<_> = rows.iter().map(|r| r.route_id.as_str()).collect();
    assert_eq!(ids, ["R003", "R002", "R005"]);
  }
}
