//! Conversions between SQLite rows and `tanktree-core` types.

use tanktree_core::{
  player::{AccountId, PlayerIdentity, VehicleStat},
  session::Realm,
  vehicle::{Vehicle, VehicleClass, VehicleId},
  Error as CoreError,
};

use crate::Result;

pub fn encode_realm(realm: Realm) -> &'static str {
  realm.tld()
}

fn decode_realm(s: &str) -> Result<Realm> {
  Ok(s.parse::<Realm>()?)
}

fn decode_tier(raw: i64) -> Result<u8> {
  if (1..=10).contains(&raw) {
    Ok(raw as u8)
  } else {
    Err(CoreError::TierOutOfRange(raw).into())
  }
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `vehicles` row before decoding the class code and tier.
pub struct RawVehicle {
  pub vehicle_id:         i64,
  pub class:              String,
  pub nation:             String,
  pub tier:               i64,
  pub tag:                String,
  pub name:               String,
  pub is_premium:         bool,
  pub is_gift:            bool,
  pub is_wheeled:         bool,
  pub hit_points:         i64,
  pub price_xp:           i64,
  pub price_credit:       i64,
  pub price_gold:         i64,
  pub elite_module_xp:    i64,
  pub elite_module_cost:  i64,
  pub elite_successor_xp: i64,
  pub description:        String,
  pub url:                String,
}

impl RawVehicle {
  pub fn into_vehicle(self) -> Result<Vehicle> {
    Ok(Vehicle {
      id:                 VehicleId(self.vehicle_id),
      class:              VehicleClass::from_code(&self.class)?,
      nation:             self.nation,
      tier:               decode_tier(self.tier)?,
      tag:                self.tag,
      name:               self.name,
      premium:            self.is_premium,
      gift:               self.is_gift,
      wheeled:            self.is_wheeled,
      hit_points:         self.hit_points as u32,
      price_xp:           self.price_xp,
      price_credit:       self.price_credit,
      price_gold:         self.price_gold,
      elite_module_xp:    self.elite_module_xp,
      elite_module_cost:  self.elite_module_cost,
      elite_successor_xp: self.elite_successor_xp,
      description:        self.description,
      url:                self.url,
    })
  }
}

/// A `players` row.
pub struct RawPlayer {
  pub realm:      String,
  pub account_id: i64,
  pub name:       String,
}

impl RawPlayer {
  pub fn into_identity(self) -> Result<PlayerIdentity> {
    Ok(PlayerIdentity {
      realm:      decode_realm(&self.realm)?,
      account_id: AccountId(self.account_id),
      name:       self.name,
    })
  }
}

/// A `player_vehicles` row.
pub struct RawStat {
  pub realm:      String,
  pub account_id: i64,
  pub vehicle_id: i64,
  pub battles:    i64,
  pub wins:       i64,
  pub mastery:    i64,
  pub win_rate:   f64,
}

impl RawStat {
  pub fn into_stat(self) -> Result<VehicleStat> {
    Ok(VehicleStat {
      realm:      decode_realm(&self.realm)?,
      account_id: AccountId(self.account_id),
      vehicle:    VehicleId(self.vehicle_id),
      battles:    self.battles as u32,
      wins:       self.wins as u32,
      // Clamp instead of erroring: out-of-range masteries render as rank 0.
      mastery:    u8::try_from(self.mastery).unwrap_or(u8::MAX),
      win_rate:   self.win_rate,
    })
  }
}
