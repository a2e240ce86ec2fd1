//! Greedy cross-ship pooling allocator.
//!
//! One pooling event redistributes CB among N ships: surplus ships cover
//! deficit ships until either side runs out. The scan order is fixed —
//! donors largest-surplus-first, receivers most-deficit-first — so any
//! given input multiset produces exactly one result, which is what makes
//! a pooling decision auditable after the fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// One ship's CB as submitted to a pooling event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCb {
  pub ship_id: String,
  pub cb:      f64,
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

/// One member's before/after snapshot from an allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolAllocation {
  pub ship_id:   String,
  pub cb_before: f64,
  pub cb_after:  f64,
}

/// A persisted pooling event — a frozen snapshot of one allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRecord {
  pub pool_id:    Uuid,
  pub year:       i32,
  pub created_at: DateTime<Utc>,
  pub members:    Vec<PoolAllocation>,
}

/// Sum of `cb_after` across an allocation — the API-visible pool sum.
pub fn pool_sum(members: &[PoolAllocation]) -> f64 {
  members.iter().map(|m| m.cb_after).sum()
}

// ─── Allocation ──────────────────────────────────────────────────────────────

/// Run one greedy allocation round over `members`.
///
/// Members are sorted descending by CB (stable, so ties keep input
/// order). Each donor, starting with the largest surplus, fills
/// receivers from the tail of the sorted list — the worst deficit first —
/// until the donor is exhausted or no deficits remain. The returned list
/// is in sorted order, and `sum(cb_after) == sum(cb_before)`.
pub fn allocate(members: &[MemberCb]) -> Result<Vec<PoolAllocation>> {
  if members.is_empty() {
    return Err(Error::InvalidMember("pool must have at least one member".into()));
  }
  for member in members {
    if member.ship_id.is_empty() {
      return Err(Error::InvalidMember("member is missing a ship id".into()));
    }
    if !member.cb.is_finite() {
      return Err(Error::InvalidMember(format!(
        "member {} has a non-finite cb",
        member.ship_id
      )));
    }
  }

  let total: f64 = members.iter().map(|m| m.cb).sum();
  if total < 0.0 {
    return Err(Error::NegativePoolTotal(total));
  }

  let mut sorted: Vec<&MemberCb> = members.iter().collect();
  sorted.sort_by(|a, b| b.cb.total_cmp(&a.cb));

  let mut result: Vec<PoolAllocation> = sorted
    .into_iter()
    .map(|m| PoolAllocation {
      ship_id:   m.ship_id.clone(),
      cb_before: m.cb,
      cb_after:  m.cb,
    })
    .collect();

  for i in 0..result.len() {
    for j in (i + 1..result.len()).rev() {
      if result[i].cb_after <= 0.0 {
        break;
      }
      if result[j].cb_after >= 0.0 {
        continue;
      }

      let give = result[i].cb_after.min(-result[j].cb_after);
      result[i].cb_after -= give;
      result[j].cb_after += give;
    }
  }

  Ok(result)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn member(ship_id: &str, cb: f64) -> MemberCb {
    MemberCb { ship_id: ship_id.into(), cb }
  }

  fn by_ship<'a>(result: &'a [PoolAllocation], ship_id: &str) -> &'a PoolAllocation {
    result.iter().find(|m| m.ship_id == ship_id).unwrap()
  }

  #[test]
  fn single_donor_fills_worst_deficit_first() {
    let result = allocate(&[
      member("A", -50_000.0),
      member("B", 120_000.0),
      member("C", -20_000.0),
    ])
    .unwrap();

    // Sorted descending by original cb.
    let ids: Vec<_> = result.iter().map(|m| m.ship_id.as_str()).collect();
    assert_eq!(ids, ["B", "A", "C"]);

    assert_eq!(by_ship(&result, "B").cb_before, 120_000.0);
    assert_eq!(by_ship(&result, "B").cb_after, 50_000.0);
    assert_eq!(by_ship(&result, "A").cb_after, 0.0);
    assert_eq!(by_ship(&result, "C").cb_after, 0.0);

    assert_eq!(pool_sum(&result), 50_000.0);
  }

  #[test]
  fn conservation_holds() {
    let members = vec![
      member("A", -50_000.0),
      member("B", 120_000.0),
      member("C", -20_000.0),
      member("D", 80_000.0),
      member("E", -30_000.0),
    ];
    let before: f64 = members.iter().map(|m| m.cb).sum();
    let result = allocate(&members).unwrap();
    let after: f64 = result.iter().map(|m| m.cb_after).sum();

    assert_eq!(before, after);
  }

  #[test]
  fn deficits_never_overshoot_zero() {
    let result = allocate(&[
      member("A", 100.0),
      member("B", -30.0),
      member("C", -20.0),
      member("D", -10.0),
    ])
    .unwrap();

    for m in &result {
      if m.cb_before < 0.0 {
        assert!(m.cb_after <= 0.0, "{} overshot: {}", m.ship_id, m.cb_after);
        assert!(m.cb_after >= m.cb_before);
      }
    }
    // Total surplus covers all deficits here.
    assert!(result.iter().all(|m| m.cb_before >= 0.0 || m.cb_after == 0.0));
  }

  #[test]
  fn exhausted_donor_leaves_remaining_deficit() {
    // Surplus 30 against deficits 20 + 15: worst deficit filled first,
    // the remainder goes to the smaller one.
    let result =
      allocate(&[member("A", 30.0), member("B", -20.0), member("C", -15.0)])
        .unwrap();

    assert_eq!(by_ship(&result, "A").cb_after, 0.0);
    assert_eq!(by_ship(&result, "B").cb_after, 0.0);
    assert_eq!(by_ship(&result, "C").cb_after, -5.0);
  }

  #[test]
  fn second_donor_picks_up_after_first() {
    let result = allocate(&[
      member("A", 25.0),
      member("B", 10.0),
      member("C", -30.0),
    ])
    .unwrap();

    assert_eq!(by_ship(&result, "A").cb_after, 0.0);
    assert_eq!(by_ship(&result, "B").cb_after, 5.0);
    assert_eq!(by_ship(&result, "C").cb_after, 0.0);
  }

  #[test]
  fn ties_keep_input_order() {
    let result = allocate(&[
      member("X", 10.0),
      member("Y", 10.0),
      member("Z", -5.0),
    ])
    .unwrap();

    let ids: Vec<_> = result.iter().map(|m| m.ship_id.as_str()).collect();
    assert_eq!(ids, ["X", "Y", "Z"]);
    // The first-listed of the tied donors pays.
    assert_eq!(by_ship(&result, "X").cb_after, 5.0);
    assert_eq!(by_ship(&result, "Y").cb_after, 10.0);
  }

  #[test]
  fn all_zero_members_allocate_unchanged() {
    let result = allocate(&[member("A", 0.0), member("B", 0.0)]).unwrap();
    assert!(result.iter().all(|m| m.cb_after == 0.0));
  }

  #[test]
  fn negative_total_errors() {
    let err = allocate(&[member("A", 10.0), member("B", -11.0)]).unwrap_err();
    assert!(matches!(err, Error::NegativePoolTotal(t) if t == -1.0));
  }

  #[test]
  fn empty_pool_errors() {
    assert!(matches!(allocate(&[]), Err(Error::InvalidMember(_))));
  }

  #[test]
  fn blank_ship_id_errors() {
    let err = allocate(&[member("", 10.0)]).unwrap_err();
    assert!(matches!(err, Error::InvalidMember(_)));
  }

  #[test]
  fn nan_cb_errors() {
    let err = allocate(&[member("A", f64::NAN)]).unwrap_err();
    assert!(matches!(err, Error::InvalidMember(_)));
  }
}
