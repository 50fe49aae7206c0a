//! Wire types of the Wargaming JSON API and their conversion to core
//! provider records.
//!
//! JSON objects whose member order carries meaning for us (`prices_xp`,
//! `modules_tree`, `next_tanks`) are unordered on the wire; they are
//! collected and sorted by ascending numeric key so "the first entry" is
//! deterministic across runs.

use std::collections::BTreeMap;

use serde::Deserialize;

use tanktree_core::{
  player::AccountId,
  provider::{AccountRecord, CatalogRecord, ModuleRecord, OwnedRecord},
  vehicle::{VehicleClass, VehicleId},
};

use crate::{Error, Result};

// ─── Response envelope ───────────────────────────────────────────────────────

/// Every endpoint wraps its payload in `{ status, error?, data? }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
  pub status: String,
  #[serde(default)]
  pub error:  Option<WireError>,
  #[serde(default)]
  pub data:   Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct WireError {
  #[serde(default)]
  pub message: String,
}

impl<T> Envelope<T> {
  /// Unwrap the payload, converting a non-`ok` status into an error.
  pub fn into_data(self) -> Result<T> {
    if self.status != "ok" {
      return Err(Error::Status {
        status:  self.status,
        message: self.error.map(|e| e.message).unwrap_or_default(),
      });
    }
    self.data.ok_or(Error::Malformed("missing data member"))
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WireProfile {
  #[serde(default)]
  pub hp: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WireModule {
  #[serde(default)]
  pub is_default:   bool,
  #[serde(default)]
  pub price_xp:     Option<i64>,
  #[serde(default)]
  pub price_credit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WireVehicle {
  pub tank_id: i64,
  #[serde(rename = "type")]
  pub class:   String,
  pub nation:  String,
  pub tier:    i64,
  #[serde(default)]
  pub tag:     String,
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub is_premium: bool,
  #[serde(default)]
  pub is_gift:    bool,
  #[serde(default)]
  pub is_wheeled: bool,
  #[serde(default)]
  pub default_profile: Option<WireProfile>,
  #[serde(default)]
  pub price_credit: Option<i64>,
  #[serde(default)]
  pub price_gold:   Option<i64>,
  #[serde(default)]
  pub prices_xp:    Option<BTreeMap<String, i64>>,
  #[serde(default)]
  pub modules_tree: Option<BTreeMap<String, WireModule>>,
  #[serde(default)]
  pub next_tanks:   Option<BTreeMap<String, i64>>,
  #[serde(default)]
  pub description:  String,
}

/// Sort an id-keyed map by ascending numeric id. Unparsable keys sort
/// first as id 0, mirroring the lenient integer handling of the API.
fn by_numeric_id<V>(map: BTreeMap<String, V>) -> Vec<(VehicleId, V)> {
  let mut entries: Vec<(VehicleId, V)> = map
    .into_iter()
    .map(|(k, v)| (VehicleId(k.parse().unwrap_or(0)), v))
    .collect();
  entries.sort_by_key(|(id, _)| *id);
  entries
}

impl WireVehicle {
  pub fn into_record(self) -> Result<CatalogRecord> {
    let class = VehicleClass::from_code(&self.class)?;
    let tier = u8::try_from(self.tier)
      .ok()
      .filter(|t| (1..=10).contains(t))
      .ok_or(Error::Malformed("tier out of range"))?;

    let unlock_costs = by_numeric_id(self.prices_xp.unwrap_or_default());
    let successors = by_numeric_id(self.next_tanks.unwrap_or_default());
    let modules = by_numeric_id(self.modules_tree.unwrap_or_default())
      .into_iter()
      .map(|(_, m)| ModuleRecord {
        is_default:   m.is_default,
        price_xp:     m.price_xp.unwrap_or(0),
        price_credit: m.price_credit.unwrap_or(0),
      })
      .collect();

    Ok(CatalogRecord {
      id:           VehicleId(self.tank_id),
      class,
      nation:       self.nation,
      tier,
      tag:          self.tag,
      name:         self.name,
      premium:      self.is_premium,
      gift:         self.is_gift,
      wheeled:      self.is_wheeled,
      hit_points:   self
        .default_profile
        .and_then(|p| p.hp)
        .and_then(|hp| u32::try_from(hp).ok())
        .unwrap_or(0),
      price_credit: self.price_credit.unwrap_or(0),
      price_gold:   self.price_gold.unwrap_or(0),
      description:  self.description,
      unlock_costs,
      modules,
      successors,
    })
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WireAccount {
  pub account_id: i64,
  #[serde(default)]
  pub nickname:   String,
}

impl WireAccount {
  pub fn into_record(self) -> AccountRecord {
    AccountRecord {
      account_id: AccountId(self.account_id),
      nickname:   self.nickname,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct WireBattleStats {
  #[serde(default)]
  pub battles: i64,
  #[serde(default)]
  pub wins:    i64,
}

#[derive(Debug, Deserialize)]
pub struct WireOwned {
  pub tank_id: i64,
  #[serde(default)]
  pub statistics: Option<WireBattleStats>,
  #[serde(default)]
  pub mark_of_mastery: i64,
}

impl WireOwned {
  pub fn into_record(self) -> OwnedRecord {
    let stats = self.statistics.unwrap_or(WireBattleStats {
      battles: 0,
      wins:    0,
    });
    OwnedRecord {
      vehicle: VehicleId(self.tank_id),
      battles: u32::try_from(stats.battles).unwrap_or(0),
      wins:    u32::try_from(stats.wins).unwrap_or(0),
      mastery: u8::try_from(self.mark_of_mastery).unwrap_or(u8::MAX),
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn envelope_non_ok_status_is_an_error() {
    let env: Envelope<Vec<i64>> = serde_json::from_str(
      r#"{"status": "error", "error": {"message": "INVALID_APPLICATION_ID"}}"#,
    )
    .unwrap();
    let err = env.into_data().unwrap_err();
    assert!(
      matches!(err, Error::Status { ref status, ref message }
        if status == "error" && message == "INVALID_APPLICATION_ID")
    );
  }

  #[test]
  fn envelope_ok_without_data_is_malformed() {
    let env: Envelope<Vec<i64>> =
      serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
    assert!(matches!(env.into_data(), Err(Error::Malformed(_))));
  }

  #[test]
  fn vehicle_record_orders_unlock_costs_numerically() {
    // Lexicographic key order would put "10" before "9"; numeric must not.
    let wire: WireVehicle = serde_json::from_str(
      r#"{
        "tank_id": 42, "type": "mediumTank", "nation": "ussr", "tier": 5,
        "tag": "T-34", "name": "T-34",
        "prices_xp": {"10": 7000, "9": 3500}
      }"#,
    )
    .unwrap();
    let record = wire.into_record().unwrap();
    assert_eq!(
      record.unlock_costs,
      vec![(VehicleId(9), 3500), (VehicleId(10), 7000)]
    );
  }

  #[test]
  fn vehicle_record_tolerates_null_members() {
    let wire: WireVehicle = serde_json::from_str(
      r#"{
        "tank_id": 1, "type": "lightTank", "nation": "france", "tier": 1,
        "tag": "RNH", "name": "Renault", "default_profile": null,
        "prices_xp": null, "modules_tree": null, "next_tanks": null
      }"#,
    )
    .unwrap();
    let record = wire.into_record().unwrap();
    assert_eq!(record.hit_points, 0);
    assert!(record.unlock_costs.is_empty());
    assert!(record.successors.is_empty());
  }

  #[test]
  fn vehicle_record_rejects_out_of_range_tier() {
    let wire: WireVehicle = serde_json::from_str(
      r#"{"tank_id": 1, "type": "SPG", "nation": "usa", "tier": 11}"#,
    )
    .unwrap();
    assert!(matches!(wire.into_record(), Err(Error::Malformed(_))));
  }

  #[test]
  fn owned_record_clamps_out_of_range_mastery() {
    let wire: WireOwned = serde_json::from_str(
      r#"{"tank_id": 5, "statistics": {"battles": 3, "wins": 1}, "mark_of_mastery": 300}"#,
    )
    .unwrap();
    let record = wire.into_record();
    assert_eq!(record.battles, 3);
    assert_eq!(record.mastery, u8::MAX);
  }
}
