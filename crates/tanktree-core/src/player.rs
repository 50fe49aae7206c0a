//! Player identity and per-vehicle performance records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{session::Realm, vehicle::VehicleId};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Stable numeric account identifier within a realm.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// A resolved player. Created once per (realm, name) and never mutated;
/// name lookups are case-insensitive within a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
  pub realm:      Realm,
  pub account_id: AccountId,
  pub name:       String,
}

// ─── Per-vehicle statistics ──────────────────────────────────────────────────

/// Performance of one player in one vehicle. Exists only for vehicles the
/// player has battled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleStat {
  pub realm:      Realm,
  pub account_id: AccountId,
  pub vehicle:    VehicleId,
  pub battles:    u32,
  pub wins:       u32,
  /// Mastery rank, nominally 0..=4. Out-of-range values are tolerated and
  /// rendered as rank 0.
  pub mastery:    u8,
  /// Win percentage rounded to one decimal; 0.0 when `battles` is zero.
  pub win_rate:   f64,
}

/// Win percentage rounded to one decimal place. Guarded: zero battles never
/// divides.
pub fn win_rate(wins: u32, battles: u32) -> f64 {
  if battles == 0 {
    0.0
  } else {
    (1000.0 * f64::from(wins) / f64::from(battles)).round() / 10.0
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
