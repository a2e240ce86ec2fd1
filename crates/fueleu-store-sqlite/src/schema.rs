//! SQL schema for the FuelEU SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS routes (
    route_id         TEXT PRIMARY KEY,
    vessel_type      TEXT NOT NULL,
    fuel_type        TEXT NOT NULL,
    year             INTEGER NOT NULL,
    ghg_intensity    REAL NOT NULL,   -- gCO2e/MJ
    fuel_consumption REAL NOT NULL,   -- tons
    distance         REAL NOT NULL,
    total_emissions  REAL NOT NULL,
    is_baseline      INTEGER NOT NULL DEFAULT 0
);

-- The authoritative base CB per ship-year; overwritten on recompute.
CREATE TABLE IF NOT EXISTS ship_compliance (
    ship_id  TEXT NOT NULL,
    year     INTEGER NOT NULL,
    cb_value REAL NOT NULL,
    PRIMARY KEY (ship_id, year)
);

-- The banking ledger is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS bank_entries (
    entry_id   TEXT PRIMARY KEY,
    ship_id    TEXT NOT NULL,
    year       INTEGER NOT NULL,
    amount     REAL NOT NULL,
    created_at TEXT NOT NULL      -- ISO 8601 UTC; server-assigned
);

-- One row per pooling event; immutable after creation.
CREATE TABLE IF NOT EXISTS pools (
    pool_id    TEXT PRIMARY KEY,
    year       INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

-- Member snapshots in allocation order; position preserves that order.
CREATE TABLE IF NOT EXISTS pool_members (
    pool_id   TEXT NOT NULL REFERENCES pools(pool_id),
    position  INTEGER NOT NULL,
    ship_id   TEXT NOT NULL,
    cb_before REAL NOT NULL,
    cb_after  REAL NOT NULL,
    PRIMARY KEY (pool_id, position)
);

CREATE INDEX IF NOT EXISTS bank_entries_ship_idx ON bank_entries(ship_id);
CREATE INDEX IF NOT EXISTS bank_entries_ship_year_idx ON bank_entries(ship_id, year);
CREATE INDEX IF NOT EXISTS routes_baseline_idx ON routes(is_baseline);

PRAGMA user_version = 1;
";
