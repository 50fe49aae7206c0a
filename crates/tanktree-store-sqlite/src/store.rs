//! [`SqliteStore`] — the SQLite implementation of [`TreeStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use tanktree_core::{
  player::{AccountId, PlayerIdentity, VehicleStat},
  session::Realm,
  store::{NewStat, TreeStore},
  vehicle::{TreeEdge, Vehicle, VehicleId},
};

use crate::{
  encode::{encode_realm, RawPlayer, RawStat, RawVehicle},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tanktree store backed by a single SQLite file.
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
}

// ─── TreeStore impl ──────────────────────────────────────────────────────────

impl TreeStore for SqliteStore {
  type Error = Error;

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn has_catalog(&self) -> Result<bool> {
    let found: bool = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row("SELECT 1 FROM vehicles LIMIT 1", [], |_| Ok(true))
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn replace_catalog(
    &self,
    vehicles: Vec<Vehicle>,
    edges: Vec<TreeEdge>,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tree_edges", [])?;
        tx.execute("DELETE FROM vehicles", [])?;

        {
          let mut stmt = tx.prepare(
            "INSERT INTO vehicles (
               vehicle_id, class, nation, tier, tag, name,
               is_premium, is_gift, is_wheeled, hit_points,
               price_xp, price_credit, price_gold,
               elite_module_xp, elite_module_cost, elite_successor_xp,
               description, url
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                       ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
          )?;
          for v in &vehicles {
            stmt.execute(rusqlite::params![
              v.id.0,
              v.class.code(),
              v.nation,
              v.tier,
              v.tag,
              v.name,
              v.premium,
              v.gift,
              v.wheeled,
              v.hit_points,
              v.price_xp,
              v.price_credit,
              v.price_gold,
              v.elite_module_xp,
              v.elite_module_cost,
              v.elite_successor_xp,
              v.description,
              v.url,
            ])?;
          }

          let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO tree_edges (predecessor_id, successor_id)
             VALUES (?1, ?2)",
          )?;
          for e in &edges {
            stmt.execute(rusqlite::params![e.predecessor.0, e.successor.0])?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn vehicles(&self) -> Result<Vec<Vehicle>> {
    let raws: Vec<RawVehicle> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT vehicle_id, class, nation, tier, tag, name,
                  is_premium, is_gift, is_wheeled, hit_points,
                  price_xp, price_credit, price_gold,
                  elite_module_xp, elite_module_cost, elite_successor_xp,
                  description, url
           FROM vehicles
           ORDER BY nation, tier, class",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawVehicle {
              vehicle_id:         row.get(0)?,
              class:              row.get(1)?,
              nation:             row.get(2)?,
              tier:               row.get(3)?,
              tag:                row.get(4)?,
              name:               row.get(5)?,
              is_premium:         row.get(6)?,
              is_gift:            row.get(7)?,
              is_wheeled:         row.get(8)?,
              hit_points:         row.get(9)?,
              price_xp:           row.get(10)?,
              price_credit:       row.get(11)?,
              price_gold:         row.get(12)?,
              elite_module_xp:    row.get(13)?,
              elite_module_cost:  row.get(14)?,
              elite_successor_xp: row.get(15)?,
              description:        row.get(16)?,
              url:                row.get(17)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVehicle::into_vehicle).collect()
  }

  async fn edges(&self) -> Result<Vec<TreeEdge>> {
    let edges: Vec<(i64, i64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT predecessor_id, successor_id
           FROM tree_edges
           ORDER BY predecessor_id, successor_id",
        )?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      edges
        .into_iter()
        .map(|(p, s)| TreeEdge {
          predecessor: VehicleId(p),
          successor:   VehicleId(s),
        })
        .collect(),
    )
  }

  // ── Players ───────────────────────────────────────────────────────────────

  async fn find_player(
    &self,
    realm: Realm,
    name: &str,
  ) -> Result<Option<PlayerIdentity>> {
    let realm_str = encode_realm(realm).to_owned();
    let name_lower = name.to_lowercase();

    let raw: Option<RawPlayer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT realm, account_id, name
               FROM players
               WHERE realm = ?1 AND LOWER(name) = ?2",
              rusqlite::params![realm_str, name_lower],
              |row| {
                Ok(RawPlayer {
                  realm:      row.get(0)?,
                  account_id: row.get(1)?,
                  name:       row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPlayer::into_identity).transpose()
  }

  async fn upsert_player(&self, identity: PlayerIdentity) -> Result<()> {
    let realm_str = encode_realm(identity.realm).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO players (realm, account_id, name)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![realm_str, identity.account_id.0, identity.name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Per-player statistics ─────────────────────────────────────────────────

  async fn has_stats(&self, realm: Realm, account: AccountId) -> Result<bool> {
    let realm_str = encode_realm(realm).to_owned();

    let found: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM player_vehicles
               WHERE realm = ?1 AND account_id = ?2
               LIMIT 1",
              rusqlite::params![realm_str, account.0],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn replace_stats(
    &self,
    realm: Realm,
    account: AccountId,
    rows: Vec<NewStat>,
  ) -> Result<()> {
    let realm_str = encode_realm(realm).to_owned();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM player_vehicles WHERE realm = ?1 AND account_id = ?2",
          rusqlite::params![realm_str, account.0],
        )?;

        {
          let mut stmt = tx.prepare(
            "INSERT INTO player_vehicles
               (realm, account_id, vehicle_id, battles, wins, mastery, win_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
          )?;
          for row in &rows {
            stmt.execute(rusqlite::params![
              realm_str,
              account.0,
              row.vehicle.0,
              row.battles,
              row.wins,
              row.mastery,
            ])?;
          }
        }

        // Derived column; the CASE guards rows with zero battles.
        tx.execute(
          "UPDATE player_vehicles
           SET win_rate = CASE
             WHEN battles > 0 THEN ROUND(1000.0 * wins / battles) / 10.0
             ELSE 0.0
           END
           WHERE realm = ?1 AND account_id = ?2",
          rusqlite::params![realm_str, account.0],
        )?;

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn stats(
    &self,
    realm: Realm,
    account: AccountId,
  ) -> Result<Vec<VehicleStat>> {
    let realm_str = encode_realm(realm).to_owned();

    let raws: Vec<RawStat> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT realm, account_id, vehicle_id, battles, wins, mastery, win_rate
           FROM player_vehicles
           WHERE realm = ?1 AND account_id = ?2
           ORDER BY vehicle_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![realm_str, account.0], |row| {
            Ok(RawStat {
              realm:      row.get(0)?,
              account_id: row.get(1)?,
              vehicle_id: row.get(2)?,
              battles:    row.get(3)?,
              wins:       row.get(4)?,
              mastery:    row.get(5)?,
              win_rate:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStat::into_stat).collect()
  }

  // ── Derived queries ───────────────────────────────────────────────────────

  async fn battled_nations(
    &self,
    realm: Realm,
    account: AccountId,
    min_battles: u32,
  ) -> Result<Vec<String>> {
    let realm_str = encode_realm(realm).to_owned();

    let nations: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT v.nation
           FROM player_vehicles AS s
               INNER JOIN vehicles AS v
                   ON v.vehicle_id = s.vehicle_id
           WHERE s.realm       = ?1
             AND s.account_id  = ?2
             AND s.battles    >= ?3
           ORDER BY v.nation",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![realm_str, account.0, min_battles],
            |row| row.get(0),
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(nations)
  }

  async fn unrooted_unowned(
    &self,
    realm: Realm,
    account: AccountId,
  ) -> Result<Vec<VehicleId>> {
    let realm_str = encode_realm(realm).to_owned();

    let ids: Vec<i64> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT v.vehicle_id
           FROM vehicles AS v
               LEFT OUTER JOIN tree_edges AS e         -- no predecessor
                   ON e.successor_id = v.vehicle_id
               LEFT OUTER JOIN player_vehicles AS s    -- not owned
                   ON  s.realm      = ?1
                   AND s.account_id = ?2
                   AND s.vehicle_id = v.vehicle_id
           WHERE v.tier > 1
             AND e.predecessor_id IS NULL
             AND s.vehicle_id IS NULL
           ORDER BY v.vehicle_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![realm_str, account.0], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids.into_iter().map(VehicleId).collect())
  }

  async fn non_standard(&self) -> Result<Vec<VehicleId>> {
    let ids: Vec<i64> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT vehicle_id
           FROM vehicles
           WHERE is_premium = 1
              OR is_gift    = 1
              OR price_gold > 0
              OR (price_xp = 0 AND tier > 1)
           ORDER BY vehicle_id",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids.into_iter().map(VehicleId).collect())
  }
}
