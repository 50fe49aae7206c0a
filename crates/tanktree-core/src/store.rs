//! The `TreeStore` trait and supporting row types.
//!
//! The trait is implemented by storage backends (e.g.
//! `tanktree-store-sqlite`). The cache managers write through it; the tree
//! model builder only ever reads.

use std::future::Future;

use crate::{
  player::{AccountId, PlayerIdentity, VehicleStat},
  session::Realm,
  vehicle::{TreeEdge, Vehicle, VehicleId},
};

// ─── Insert type ─────────────────────────────────────────────────────────────

/// A per-vehicle stat row as fetched from the account provider, before the
/// store derives the win rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewStat {
  pub vehicle: VehicleId,
  pub battles: u32,
  pub wins:    u32,
  pub mastery: u8,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the durable tanktree store backend.
///
/// Scope-replacing writes (`replace_catalog`, `replace_stats`) must be
/// atomic: a reader never observes the scope emptied by a half-finished
/// refresh.
pub trait TreeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Whether at least one catalog row exists.
  fn has_catalog(
    &self,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete the whole catalog (vehicles and edges) and bulk-insert the
  /// given rows, as a single transaction.
  fn replace_catalog(
    &self,
    vehicles: Vec<Vehicle>,
    edges: Vec<TreeEdge>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All vehicles, ordered by (nation, tier, class code).
  fn vehicles(
    &self,
  ) -> impl Future<Output = Result<Vec<Vehicle>, Self::Error>> + Send + '_;

  /// All research edges, ordered by (predecessor, successor).
  fn edges(
    &self,
  ) -> impl Future<Output = Result<Vec<TreeEdge>, Self::Error>> + Send + '_;

  // ── Players ───────────────────────────────────────────────────────────

  /// Look up a cached player by case-insensitive name within a realm.
  fn find_player<'a>(
    &'a self,
    realm: Realm,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<PlayerIdentity>, Self::Error>> + Send + 'a;

  /// Insert or replace a resolved player identity.
  fn upsert_player(
    &self,
    identity: PlayerIdentity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Per-player statistics ─────────────────────────────────────────────

  /// Whether any stat row exists for this (realm, account) scope.
  fn has_stats(
    &self,
    realm: Realm,
    account: AccountId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete all stat rows for the scope, bulk-insert `rows`, and recompute
  /// every win rate — one transaction. Zero-battle rows must not divide.
  fn replace_stats(
    &self,
    realm: Realm,
    account: AccountId,
    rows: Vec<NewStat>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All stat rows for the scope, ordered by vehicle id.
  fn stats(
    &self,
    realm: Realm,
    account: AccountId,
  ) -> impl Future<Output = Result<Vec<VehicleStat>, Self::Error>> + Send + '_;

  // ── Derived queries ───────────────────────────────────────────────────

  /// Distinct nations among the player's vehicles with at least
  /// `min_battles` battles, ordered alphabetically.
  fn battled_nations(
    &self,
    realm: Realm,
    account: AccountId,
    min_battles: u32,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Vehicles above tier 1 with no incoming research edge that the player
  /// does not own — the exclusion set of the focused display mode.
  fn unrooted_unowned(
    &self,
    realm: Realm,
    account: AccountId,
  ) -> impl Future<Output = Result<Vec<VehicleId>, Self::Error>> + Send + '_;

  /// Vehicles flagged premium or gift, priced in gold, or unlockable for
  /// zero XP above tier 1 — the exclusion set of the coarse display mode.
  fn non_standard(
    &self,
  ) -> impl Future<Output = Result<Vec<VehicleId>, Self::Error>> + Send + '_;
}
