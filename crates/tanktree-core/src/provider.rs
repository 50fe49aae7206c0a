//! Provider traits — the abstract remote catalog and account services.
//!
//! The traits are implemented by `tanktree-api` against the real HTTP API,
//! and by in-memory fakes in the cache-manager tests. Providers return raw
//! records; derived fields (unlock XP, elite sums, research edges) are
//! computed by the cache layer.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  player::AccountId,
  session::Session,
  vehicle::{VehicleClass, VehicleId},
};

// ─── Catalog records ─────────────────────────────────────────────────────────

/// One module of a vehicle's upgrade tree, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
  pub is_default:   bool,
  pub price_xp:     i64,
  pub price_credit: i64,
}

/// Raw catalog entry for one vehicle.
///
/// `unlock_costs` and `successors` are ordered by ascending vehicle id, so
/// "the first entry" is well defined even though the wire format is an
/// unordered JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
  pub id:          VehicleId,
  pub class:       VehicleClass,
  pub nation:      String,
  pub tier:        u8,
  pub tag:         String,
  pub name:        String,
  pub premium:     bool,
  pub gift:        bool,
  pub wheeled:     bool,
  pub hit_points:  u32,
  pub price_credit: i64,
  pub price_gold:  i64,
  pub description: String,
  /// (predecessor id, XP cost to unlock this vehicle from it).
  pub unlock_costs: Vec<(VehicleId, i64)>,
  pub modules:      Vec<ModuleRecord>,
  /// (successor id, XP cost to unlock the successor from this vehicle).
  pub successors:   Vec<(VehicleId, i64)>,
}

// ─── Account records ─────────────────────────────────────────────────────────

/// Result of an exact-match account search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
  pub account_id: AccountId,
  pub nickname:   String,
}

/// One owned vehicle of a player, with raw battle counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedRecord {
  pub vehicle: VehicleId,
  pub battles: u32,
  pub wins:    u32,
  pub mastery: u8,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// The slow-changing reference catalog, fetched one (tier, class) page at a
/// time. Calls have no side effects.
pub trait CatalogProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the page of all vehicles with the given tier and class.
  fn vehicles_page<'a>(
    &'a self,
    session: &'a Session,
    tier: u8,
    class: VehicleClass,
  ) -> impl Future<Output = Result<Vec<CatalogRecord>, Self::Error>> + Send + 'a;
}

/// The account lookup service.
pub trait AccountProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Exact-match search by player name, limited to one result.
  /// Returns `None` when no account matches exactly.
  fn find_account<'a>(
    &'a self,
    session: &'a Session,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<AccountRecord>, Self::Error>> + Send + 'a;

  /// Full list of vehicles the player has battled in, in one call.
  fn owned_vehicles<'a>(
    &'a self,
    session: &'a Session,
    account: AccountId,
  ) -> impl Future<Output = Result<Vec<OwnedRecord>, Self::Error>> + Send + 'a;
}
