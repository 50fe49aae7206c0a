//! Vehicle — a single entry of the reference catalog, plus the research
//! edges linking vehicles into a tech tree.
//!
//! Catalog rows are immutable once cached; an explicit refresh replaces the
//! whole catalog wholesale rather than diffing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Highest progression tier of any vehicle.
pub const MAX_TIER: u8 = 10;

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Stable numeric identifier of a catalog vehicle.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct VehicleId(pub i64);

impl fmt::Display for VehicleId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Class ───────────────────────────────────────────────────────────────────

/// The fixed set of vehicle classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleClass {
  Heavy,
  TankDestroyer,
  Medium,
  Light,
  Artillery,
}

impl VehicleClass {
  /// All classes, in the order the catalog is swept page by page.
  pub const ALL: [VehicleClass; 5] = [
    VehicleClass::Heavy,
    VehicleClass::TankDestroyer,
    VehicleClass::Medium,
    VehicleClass::Light,
    VehicleClass::Artillery,
  ];

  /// Wire code used by the remote API and stored verbatim in the catalog.
  pub fn code(self) -> &'static str {
    match self {
      VehicleClass::Heavy         => "heavyTank",
      VehicleClass::TankDestroyer => "AT-SPG",
      VehicleClass::Medium        => "mediumTank",
      VehicleClass::Light         => "lightTank",
      VehicleClass::Artillery     => "SPG",
    }
  }

  /// HTML-entity glyph rendered in front of the vehicle name.
  pub fn glyph(self) -> &'static str {
    match self {
      VehicleClass::Heavy         => "&#x25CF;",
      VehicleClass::TankDestroyer => "&#x25BC;",
      VehicleClass::Medium        => "&#x25C8;",
      VehicleClass::Light         => "&#x2BC1;",
      VehicleClass::Artillery     => "&#x25FC;",
    }
  }

  pub fn from_code(code: &str) -> Result<Self> {
    match code {
      "heavyTank"  => Ok(VehicleClass::Heavy),
      "AT-SPG"     => Ok(VehicleClass::TankDestroyer),
      "mediumTank" => Ok(VehicleClass::Medium),
      "lightTank"  => Ok(VehicleClass::Light),
      "SPG"        => Ok(VehicleClass::Artillery),
      other        => Err(Error::UnknownClassCode(other.to_string())),
    }
  }
}

// ─── Vehicle ─────────────────────────────────────────────────────────────────

/// One catalog entry. All cost fields are in the game's own units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
  pub id:          VehicleId,
  pub class:       VehicleClass,
  /// Free-form short nation code (e.g. `ussr`, `germany`).
  pub nation:      String,
  /// Progression tier, 1..=10.
  pub tier:        u8,
  /// Short technical tag, part of the canonical URL.
  pub tag:         String,
  pub name:        String,
  pub premium:     bool,
  pub gift:        bool,
  pub wheeled:     bool,
  pub hit_points:  u32,
  /// XP needed to unlock this vehicle from its predecessor. Zero when the
  /// vehicle has no researchable predecessor.
  pub price_xp:    i64,
  pub price_credit: i64,
  pub price_gold:  i64,
  /// Summed XP over all non-default modules.
  pub elite_module_xp:   i64,
  /// Summed credit cost over all non-default modules.
  pub elite_module_cost: i64,
  /// Summed XP over all researchable successors.
  pub elite_successor_xp: i64,
  pub description: String,
  /// Canonical portal URL of the vehicle.
  pub url:         String,
}

/// A directed research edge: `predecessor` unlocks `successor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEdge {
  pub predecessor: VehicleId,
  pub successor:   VehicleId,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn class_codes_round_trip() {
    for class in VehicleClass::ALL {
      assert_eq!(VehicleClass::from_code(class.code()).unwrap(), class);
    }
  }

  #[test]
  fn unknown_class_code_errors() {
    assert!(matches!(
      VehicleClass::from_code("hoverTank"),
      Err(Error::UnknownClassCode(_))
    ));
  }
}
