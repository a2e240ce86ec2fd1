//! [`SqliteStore`] — the SQLite implementation of [`ComplianceStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use fueleu_core::{
  banking::{BankEntry, NewBankEntry},
  compliance::ComplianceRecord,
  pooling::{PoolAllocation, PoolRecord},
  route::{NewRoute, Route},
  store::ComplianceStore,
};

use crate::{
  Error, Result,
  encode::{
    RawBankEntry, RawComplianceRecord, RawPoolMember, RawRoute, decode_dt,
    decode_uuid, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

const ROUTE_COLUMNS: &str = "route_id, vessel_type, fuel_type, year, \
                             ghg_intensity, fuel_consumption, distance, \
                             total_emissions, is_baseline";

fn route_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRoute> {
  Ok(RawRoute {
    route_id:         row.get(0)?,
    vessel_type:      row.get(1)?,
    fuel_type:        row.get(2)?,
    year:             row.get(3)?,
    ghg_intensity:    row.get(4)?,
    fuel_consumption: row.get(5)?,
    distance:         row.get(6)?,
    total_emissions:  row.get(7)?,
    is_baseline:      row.get(8)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A FuelEU compliance store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Delete all rows from every table. Used by demo seeding; the engine
  /// never calls this.
  pub async fn reset(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(
          "DELETE FROM pool_members;
           DELETE FROM pools;
           DELETE FROM bank_entries;
           DELETE FROM ship_compliance;
           DELETE FROM routes;",
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ComplianceStore impl ────────────────────────────────────────────────────

impl ComplianceStore for SqliteStore {
  type Error = Error;

  // ── Routes ────────────────────────────────────────────────────────────────

  async fn add_route(&self, input: NewRoute) -> Result<Route> {
    let route = input.into_route();
    let stored = route.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO routes (
             route_id, vessel_type, fuel_type, year,
             ghg_intensity, fuel_consumption, distance,
             total_emissions, is_baseline
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            stored.route_id,
            stored.vessel_type,
            stored.fuel_type,
            stored.year,
            stored.ghg_intensity,
            stored.fuel_consumption,
            stored.distance,
            stored.total_emissions,
            stored.is_baseline,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(route)
  }

  async fn get_route(&self, route_id: &str) -> Result<Option<Route>> {
    let id = route_id.to_owned();

    let raw: Option<RawRoute> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE route_id = ?1"),
              rusqlite::params![id],
              route_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawRoute::into_route))
  }

  async fn list_routes(&self) -> Result<Vec<Route>> {
    let raws: Vec<RawRoute> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {ROUTE_COLUMNS} FROM routes ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], route_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawRoute::into_route).collect())
  }

  async fn set_baseline(&self, route_id: &str) -> Result<()> {
    let id = route_id.to_owned();

    // Clear-then-set must be one atomic step so no second baseline is
    // ever observable after the call returns.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("UPDATE routes SET is_baseline = 0 WHERE is_baseline = 1", [])?;
        tx.execute(
          "UPDATE routes SET is_baseline = 1 WHERE route_id = ?1",
          rusqlite::params![id],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn get_baseline(&self) -> Result<Option<Route>> {
    let raw: Option<RawRoute> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE is_baseline = 1"),
              [],
              route_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawRoute::into_route))
  }

  // ── Compliance records ────────────────────────────────────────────────────

  async fn upsert_compliance(&self, record: ComplianceRecord) -> Result<ComplianceRecord> {
    let stored = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ship_compliance (ship_id, year, cb_value)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (ship_id, year) DO UPDATE SET cb_value = excluded.cb_value",
          rusqlite::params![stored.ship_id, stored.year, stored.cb_value],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn get_compliance(
    &self,
    ship_id: &str,
    year: i32,
  ) -> Result<Option<ComplianceRecord>> {
    let id = ship_id.to_owned();

    let raw: Option<RawComplianceRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT ship_id, year, cb_value FROM ship_compliance
               WHERE ship_id = ?1 AND year = ?2",
              rusqlite::params![id, year],
              |row| {
                Ok(RawComplianceRecord {
                  ship_id:  row.get(0)?,
                  year:     row.get(1)?,
                  cb_value: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawComplianceRecord::into_record))
  }

  // ── Banking ledger — append-only writes ───────────────────────────────────

  async fn record_bank_entry(&self, input: NewBankEntry) -> Result<BankEntry> {
    let entry = BankEntry {
      entry_id:   Uuid::new_v4(),
      ship_id:    input.ship_id,
      year:       input.year,
      amount:     input.amount,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(entry.entry_id);
    let ship_id = entry.ship_id.clone();
    let year = entry.year;
    let amount = entry.amount;
    let at_str = encode_dt(entry.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO bank_entries (entry_id, ship_id, year, amount, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, ship_id, year, amount, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(entry)
  }

  async fn list_bank_entries(&self, ship_id: &str) -> Result<Vec<BankEntry>> {
    let id = ship_id.to_owned();

    let raws: Vec<RawBankEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, ship_id, year, amount, created_at
           FROM bank_entries
           WHERE ship_id = ?1
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(RawBankEntry {
              entry_id:   row.get(0)?,
              ship_id:    row.get(1)?,
              year:       row.get(2)?,
              amount:     row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBankEntry::into_entry).collect()
  }

  async fn bank_total(&self, ship_id: &str, year: i32) -> Result<f64> {
    let id = ship_id.to_owned();

    let total: f64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(amount), 0.0) FROM bank_entries
           WHERE ship_id = ?1 AND year = ?2",
          rusqlite::params![id, year],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(total)
  }

  // ── Pools ─────────────────────────────────────────────────────────────────

  async fn create_pool(
    &self,
    year: i32,
    members: Vec<PoolAllocation>,
  ) -> Result<PoolRecord> {
    let record = PoolRecord {
      pool_id:    Uuid::new_v4(),
      year,
      created_at: Utc::now(),
      members,
    };

    let pool_id_str = encode_uuid(record.pool_id);
    let at_str = encode_dt(record.created_at);
    let rows: Vec<(String, f64, f64)> = record
      .members
      .iter()
      .map(|m| (m.ship_id.clone(), m.cb_before, m.cb_after))
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO pools (pool_id, year, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![pool_id_str, year, at_str],
        )?;
        for (position, (ship_id, cb_before, cb_after)) in rows.iter().enumerate() {
          tx.execute(
            "INSERT INTO pool_members (pool_id, position, ship_id, cb_before, cb_after)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![pool_id_str, position as i64, ship_id, cb_before, cb_after],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn get_pool(&self, pool_id: Uuid) -> Result<Option<PoolRecord>> {
    let id_str = encode_uuid(pool_id);

    let raw: Option<(String, i32, String, Vec<RawPoolMember>)> = self
      .conn
      .call(move |conn| {
        let header: Option<(String, i32, String)> = conn
          .query_row(
            "SELECT pool_id, year, created_at FROM pools WHERE pool_id = ?1",
            rusqlite::params![id_str],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
          )
          .optional()?;

        let Some((pool_id, year, created_at)) = header else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT ship_id, cb_before, cb_after FROM pool_members
           WHERE pool_id = ?1 ORDER BY position",
        )?;
        let members = stmt
          .query_map(rusqlite::params![pool_id], |row| {
            Ok(RawPoolMember {
              ship_id:   row.get(0)?,
              cb_before: row.get(1)?,
              cb_after:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((pool_id, year, created_at, members)))
      })
      .await?;

    let Some((pool_id_str, year, created_at_str, members)) = raw else {
      return Ok(None);
    };

    Ok(Some(PoolRecord {
      pool_id:    decode_uuid(&pool_id_str)?,
      year,
      created_at: decode_dt(&created_at_str)?,
      members:    members.into_iter().map(RawPoolMember::into_allocation).collect(),
    }))
  }

  async fn list_pools(&self) -> Result<Vec<PoolRecord>> {
    let raws: Vec<(String, i32, String, Vec<RawPoolMember>)> = self
      .conn
      .call(move |conn| {
        let mut pools_stmt = conn.prepare(
          "SELECT pool_id, year, created_at FROM pools
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let headers = pools_stmt
          .query_map([], |row| {
            Ok((
              row.get::<_, String>(0)?,
              row.get::<_, i32>(1)?,
              row.get::<_, String>(2)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut members_stmt = conn.prepare(
          "SELECT ship_id, cb_before, cb_after FROM pool_members
           WHERE pool_id = ?1 ORDER BY position",
        )?;

        let mut out = Vec::with_capacity(headers.len());
        for (pool_id, year, created_at) in headers {
          let members = members_stmt
            .query_map(rusqlite::params![pool_id], |row| {
              Ok(RawPoolMember {
                ship_id:   row.get(0)?,
                cb_before: row.get(1)?,
                cb_after:  row.get(2)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          out.push((pool_id, year, created_at, members));
        }

        Ok(out)
      })
      .await?;

    raws
      .into_iter()
      .map(|(pool_id_str, year, created_at_str, members)| {
        Ok(PoolRecord {
          pool_id:    decode_uuid(&pool_id_str)?,
          year,
          created_at: decode_dt(&created_at_str)?,
          members:    members
            .into_iter()
            .map(RawPoolMember::into_allocation)
            .collect(),
        })
      })
      .collect()
  }
}
