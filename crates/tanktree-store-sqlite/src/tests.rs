//! Integration tests for `SqliteStore` against an in-memory database.

use tanktree_core::{
  player::{AccountId, PlayerIdentity},
  session::Realm,
  store::{NewStat, TreeStore},
  vehicle::{TreeEdge, Vehicle, VehicleClass, VehicleId},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn vehicle(id: i64, nation: &str, tier: u8, class: VehicleClass) -> Vehicle {
  Vehicle {
    id:                 VehicleId(id),
    class,
    nation:             nation.to_string(),
    tier,
    tag:                format!("V{id}"),
    name:               format!("Vehicle {id}"),
    premium:            false,
    gift:               false,
    wheeled:            false,
    hit_points:         340,
    price_xp:           if tier > 1 { 1_000 } else { 0 },
    price_credit:       3_500,
    price_gold:         0,
    elite_module_xp:    0,
    elite_module_cost:  0,
    elite_successor_xp: 0,
    description:        String::new(),
    url:                format!("https://worldoftanks.eu/en/tankopedia/{id}-V{id}/"),
  }
}

fn edge(predecessor: i64, successor: i64) -> TreeEdge {
  TreeEdge {
    predecessor: VehicleId(predecessor),
    successor:   VehicleId(successor),
  }
}

fn stat(vehicle: i64, battles: u32, wins: u32, mastery: u8) -> NewStat {
  NewStat {
    vehicle: VehicleId(vehicle),
    battles,
    wins,
    mastery,
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_has_no_catalog() {
  let s = store().await;
  assert!(!s.has_catalog().await.unwrap());
}

#[tokio::test]
async fn replace_catalog_round_trips() {
  let s = store().await;
  s.replace_catalog(
    vec![vehicle(1, "ussr", 1, VehicleClass::Light)],
    vec![edge(1, 2)],
  )
  .await
  .unwrap();

  assert!(s.has_catalog().await.unwrap());
  let vehicles = s.vehicles().await.unwrap();
  assert_eq!(vehicles.len(), 1);
  assert_eq!(vehicles[0].id, VehicleId(1));
  assert_eq!(vehicles[0].class, VehicleClass::Light);
  assert_eq!(s.edges().await.unwrap(), vec![edge(1, 2)]);
}

#[tokio::test]
async fn vehicles_are_ordered_by_nation_tier_class() {
  let s = store().await;
  s.replace_catalog(
    vec![
      vehicle(4, "ussr", 2, VehicleClass::Heavy),
      vehicle(3, "ussr", 1, VehicleClass::Light),
      vehicle(2, "france", 5, VehicleClass::Medium),
      // Same nation and tier: class codes order 'AT-SPG' < 'heavyTank'.
      vehicle(5, "ussr", 2, VehicleClass::TankDestroyer),
    ],
    vec![],
  )
  .await
  .unwrap();

  let ids: Vec<i64> = s.vehicles().await.unwrap().iter().map(|v| v.id.0).collect();
  assert_eq!(ids, vec![2, 3, 5, 4]);
}

#[tokio::test]
async fn replace_catalog_leaves_no_stale_edges() {
  let s = store().await;
  s.replace_catalog(
    vec![
      vehicle(1, "ussr", 1, VehicleClass::Light),
      vehicle(2, "ussr", 2, VehicleClass::Light),
    ],
    vec![edge(1, 2)],
  )
  .await
  .unwrap();

  s.replace_catalog(
    vec![vehicle(9, "france", 1, VehicleClass::Light)],
    vec![],
  )
  .await
  .unwrap();

  assert!(s.edges().await.unwrap().is_empty());
  let vehicles = s.vehicles().await.unwrap();
  assert_eq!(vehicles.len(), 1);
  assert_eq!(vehicles[0].id, VehicleId(9));
}

#[tokio::test]
async fn edges_are_ordered_by_predecessor_then_successor() {
  let s = store().await;
  s.replace_catalog(
    vec![],
    vec![edge(5, 9), edge(1, 7), edge(5, 2), edge(1, 3)],
  )
  .await
  .unwrap();

  assert_eq!(
    s.edges().await.unwrap(),
    vec![edge(1, 3), edge(1, 7), edge(5, 2), edge(5, 9)]
  );
}

// ─── Players ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_player_is_case_insensitive_within_a_realm() {
  let s = store().await;
  s.upsert_player(PlayerIdentity {
    realm:      Realm::Eu,
    account_id: AccountId(42),
    name:       "Pamboum".to_string(),
  })
  .await
  .unwrap();

  let hit = s.find_player(Realm::Eu, "pAmBoUm").await.unwrap();
  assert_eq!(hit.map(|p| p.account_id), Some(AccountId(42)));

  // Same name on another realm is a different player.
  assert!(s.find_player(Realm::Asia, "Pamboum").await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_player_replaces_the_row() {
  let s = store().await;
  for name in ["Old", "New"] {
    s.upsert_player(PlayerIdentity {
      realm:      Realm::Com,
      account_id: AccountId(7),
      name:       name.to_string(),
    })
    .await
    .unwrap();
  }

  let found = s.find_player(Realm::Com, "new").await.unwrap().unwrap();
  assert_eq!(found.account_id, AccountId(7));
  assert_eq!(found.name, "New");
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_stats_recomputes_win_rates() {
  let s = store().await;
  s.replace_stats(
    Realm::Eu,
    AccountId(1),
    vec![stat(1, 10, 6, 1), stat(2, 3, 2, 0), stat(3, 0, 0, 0)],
  )
  .await
  .unwrap();

  let stats = s.stats(Realm::Eu, AccountId(1)).await.unwrap();
  assert_eq!(stats.len(), 3);
  assert_eq!(stats[0].win_rate, 60.0);
  assert_eq!(stats[1].win_rate, 66.7);
  // battles = 0: guarded, not a division error.
  assert_eq!(stats[2].win_rate, 0.0);
}

#[tokio::test]
async fn replace_stats_is_scoped_to_one_account() {
  let s = store().await;
  s.replace_stats(Realm::Eu, AccountId(1), vec![stat(1, 5, 3, 0)])
    .await
    .unwrap();
  s.replace_stats(Realm::Eu, AccountId(2), vec![stat(1, 9, 4, 0)])
    .await
    .unwrap();

  // Replacing account 1 must not touch account 2.
  s.replace_stats(Realm::Eu, AccountId(1), vec![])
    .await
    .unwrap();

  assert!(!s.has_stats(Realm::Eu, AccountId(1)).await.unwrap());
  assert!(s.has_stats(Realm::Eu, AccountId(2)).await.unwrap());
}

// ─── Derived queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn battled_nations_applies_the_threshold_exactly() {
  let s = store().await;
  s.replace_catalog(
    vec![
      vehicle(1, "ussr", 1, VehicleClass::Light),
      vehicle(2, "france", 1, VehicleClass::Light),
      vehicle(3, "germany", 1, VehicleClass::Light),
    ],
    vec![],
  )
  .await
  .unwrap();
  s.replace_stats(
    Realm::Eu,
    AccountId(1),
    vec![stat(1, 50, 25, 0), stat(2, 10, 5, 0), stat(3, 9, 4, 0)],
  )
  .await
  .unwrap();

  // An owned vehicle below the threshold must not introduce its nation.
  let nations = s.battled_nations(Realm::Eu, AccountId(1), 10).await.unwrap();
  assert_eq!(nations, vec!["france".to_string(), "ussr".to_string()]);
}

#[tokio::test]
async fn battled_nations_empty_without_stats() {
  let s = store().await;
  s.replace_catalog(vec![vehicle(1, "ussr", 1, VehicleClass::Light)], vec![])
    .await
    .unwrap();

  let nations = s.battled_nations(Realm::Eu, AccountId(1), 0).await.unwrap();
  assert!(nations.is_empty());
}

#[tokio::test]
async fn unrooted_unowned_excludes_only_orphans_above_tier_one() {
  let s = store().await;
  s.replace_catalog(
    vec![
      vehicle(1, "ussr", 1, VehicleClass::Light),  // tier 1: kept
      vehicle(2, "ussr", 2, VehicleClass::Light),  // has predecessor: kept
      vehicle(3, "ussr", 8, VehicleClass::Heavy),  // orphan, unowned: excluded
      vehicle(4, "ussr", 8, VehicleClass::Heavy),  // orphan but owned: kept
    ],
    vec![edge(1, 2)],
  )
  .await
  .unwrap();
  s.replace_stats(Realm::Eu, AccountId(1), vec![stat(4, 12, 6, 0)])
    .await
    .unwrap();

  let excluded = s.unrooted_unowned(Realm::Eu, AccountId(1)).await.unwrap();
  assert_eq!(excluded, vec![VehicleId(3)]);
}

#[tokio::test]
async fn non_standard_covers_every_coarse_rule() {
  let s = store().await;
  let mut premium = vehicle(1, "usa", 5, VehicleClass::Medium);
  premium.premium = true;
  let mut gift = vehicle(2, "usa", 5, VehicleClass::Medium);
  gift.gift = true;
  let mut gold = vehicle(3, "usa", 5, VehicleClass::Medium);
  gold.price_gold = 7_500;
  let mut free_high_tier = vehicle(4, "usa", 5, VehicleClass::Medium);
  free_high_tier.price_xp = 0;
  let regular = vehicle(5, "usa", 5, VehicleClass::Medium);
  let starter = vehicle(6, "usa", 1, VehicleClass::Light); // zero XP, tier 1: standard

  s.replace_catalog(
    vec![premium, gift, gold, free_high_tier, regular, starter],
    vec![],
  )
  .await
  .unwrap();

  let excluded = s.non_standard().await.unwrap();
  assert_eq!(
    excluded,
    vec![VehicleId(1), VehicleId(2), VehicleId(3), VehicleId(4)]
  );
}
