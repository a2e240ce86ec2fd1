//! Banking ledger types and validation.
//!
//! Banked surplus is represented as append-only ledger rows; a ship-year's
//! available balance is always the sum of its rows. Applying banked CB is
//! a read-derived computation — it records no debit row. Repeated applies
//! therefore see the same available balance; see DESIGN.md before
//! changing that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// An immutable ledger row. Once written, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankEntry {
  pub entry_id:   Uuid,
  pub ship_id:    String,
  pub year:       i32,
  pub amount:     f64,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::ComplianceStore::record_bank_entry`].
/// `entry_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBankEntry {
  pub ship_id: String,
  pub year:    i32,
  pub amount:  f64,
}

impl NewBankEntry {
  /// Only strictly positive amounts may be banked.
  pub fn validate(&self) -> Result<()> {
    if self.amount <= 0.0 {
      return Err(Error::InvalidAmount(self.amount));
    }
    Ok(())
  }
}

/// Outcome of spending banked CB against a deficit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankApplication {
  pub cb_before: f64,
  pub applied:   f64,
  pub cb_after:  f64,
}

/// Spend `requested` out of `available` banked CB.
pub fn apply_banked(requested: f64, available: f64) -> Result<BankApplication> {
  if requested > available {
    return Err(Error::InsufficientBalance { requested, available });
  }

  Ok(BankApplication {
    cb_before: available,
    applied:   requested,
    cb_after:  available - requested,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(amount: f64) -> NewBankEntry {
    NewBankEntry { ship_id: "R002".into(), year: 2024, amount }
  }

  #[test]
  fn bank_rejects_zero() {
    assert!(matches!(
      entry(0.0).validate(),
      Err(Error::InvalidAmount(a)) if a == 0.0
    ));
  }

  #[test]
  fn bank_rejects_negative() {
    assert!(matches!(entry(-1.0).validate(), Err(Error::InvalidAmount(_))));
  }

  #[test]
  fn bank_accepts_positive() {
    assert!(entry(1.0).validate().is_ok());
  }

  #[test]
  fn apply_within_balance() {
    let outcome = apply_banked(50.0, 100.0).unwrap();
    assert_eq!(outcome.cb_before, 100.0);
    assert_eq!(outcome.applied, 50.0);
    assert_eq!(outcome.cb_after, 50.0);
  }

  #[test]
  fn apply_entire_balance() {
    let outcome = apply_banked(100.0, 100.0).unwrap();
    assert_eq!(outcome.cb_after, 0.0);
  }

  #[test]
  fn apply_beyond_balance_errors() {
    let err = apply_banked(150.0, 100.0).unwrap_err();
    assert!(matches!(
      err,
      Error::InsufficientBalance { requested, available }
        if requested == 150.0 && available == 100.0
    ));
  }
}
