//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings, the baseline flag as 0/1.

use chrono::{DateTime, Utc};
use fueleu_core::{
  banking::BankEntry, compliance::ComplianceRecord, pooling::PoolAllocation,
  route::Route,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `routes` row.
pub struct RawRoute {
  pub route_id:         String,
  pub vessel_type:      String,
  pub fuel_type:        String,
  pub year:             i32,
  pub ghg_intensity:    f64,
  pub fuel_consumption: f64,
  pub distance:         f64,
  pub total_emissions:  f64,
  pub is_baseline:      bool,
}

impl RawRoute {
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
      is_baseline:      self.is_baseline,
    }
  }
}

/// Raw values read directly from a `ship_compliance` row.
pub struct RawComplianceRecord {
  pub ship_id:  String,
  pub year:     i32,
  pub cb_value: f64,
}

impl RawComplianceRecord {
  pub fn into_record(self) -> ComplianceRecord {
    ComplianceRecord {
      ship_id:  self.ship_id,
      year:     self.year,
      cb_value: self.cb_value,
    }
  }
}

/// Raw strings read directly from a `bank_entries` row.
pub struct RawBankEntry {
  pub entry_id:   String,
  pub ship_id:    String,
  pub year:       i32,
  pub amount:     f64,
  pub created_at: String,
}

impl RawBankEntry {
  pub fn into_entry(self) -> Result<BankEntry> {
    Ok(BankEntry {
      entry_id:   decode_uuid(&self.entry_id)?,
      ship_id:    self.ship_id,
      year:       self.year,
      amount:     self.amount,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `pool_members` row.
pub struct RawPoolMember {
  pub ship_id:   String,
  pub cb_before: f64,
  pub cb_after:  f64,
}

impl RawPoolMember {
  pub fn into_allocation(self) -> PoolAllocation {
    PoolAllocation {
      ship_id:   self.ship_id,
      cb_before: self.cb_before,
      cb_after:  self.cb_after,
    }
  }
}
