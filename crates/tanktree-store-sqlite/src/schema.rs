//! SQL schema for the tanktree SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Reference catalog. Wholesale-replaced on refresh, never diffed.
CREATE TABLE IF NOT EXISTS vehicles (
    vehicle_id         INTEGER PRIMARY KEY,
    class              TEXT NOT NULL,   -- wire code, e.g. 'heavyTank'
    nation             TEXT NOT NULL,
    tier               INTEGER NOT NULL CHECK (tier BETWEEN 1 AND 10),
    tag                TEXT NOT NULL,
    name               TEXT NOT NULL,
    is_premium         INTEGER NOT NULL,
    is_gift            INTEGER NOT NULL,
    is_wheeled         INTEGER NOT NULL,
    hit_points         INTEGER NOT NULL,
    price_xp           INTEGER NOT NULL,
    price_credit       INTEGER NOT NULL,
    price_gold         INTEGER NOT NULL,
    elite_module_xp    INTEGER NOT NULL,
    elite_module_cost  INTEGER NOT NULL,
    elite_successor_xp INTEGER NOT NULL,
    description        TEXT NOT NULL,
    url                TEXT NOT NULL
);

-- Research edges of the tech tree. Replaced together with vehicles.
CREATE TABLE IF NOT EXISTS tree_edges (
    predecessor_id INTEGER NOT NULL,
    successor_id   INTEGER NOT NULL,
    PRIMARY KEY (predecessor_id, successor_id)
);

-- Resolved player identities; written once per (realm, name).
CREATE TABLE IF NOT EXISTS players (
    realm      TEXT NOT NULL,
    account_id INTEGER NOT NULL,
    name       TEXT NOT NULL,
    PRIMARY KEY (realm, account_id)
);

-- Per-player per-vehicle counters; scope-replaced on refresh.
CREATE TABLE IF NOT EXISTS player_vehicles (
    realm      TEXT NOT NULL,
    account_id INTEGER NOT NULL,
    vehicle_id INTEGER NOT NULL,
    battles    INTEGER NOT NULL,
    wins       INTEGER NOT NULL,
    mastery    INTEGER NOT NULL,
    win_rate   REAL NOT NULL,
    PRIMARY KEY (realm, account_id, vehicle_id)
);

CREATE INDEX IF NOT EXISTS vehicles_layout_idx ON vehicles(nation, tier, class);
CREATE INDEX IF NOT EXISTS edges_successor_idx ON tree_edges(successor_id);

PRAGMA user_version = 1;
";
