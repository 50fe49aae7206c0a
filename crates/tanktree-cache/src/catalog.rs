//! Catalog cache manager: the paced full-catalog sweep and the folding of
//! raw records into persisted vehicles and research edges.

use std::time::Duration;

use tracing::{debug, info};

use tanktree_core::{
  provider::{CatalogProvider, CatalogRecord},
  session::Session,
  store::TreeStore,
  vehicle::{TreeEdge, Vehicle, VehicleClass, MAX_TIER},
};

use crate::error::{CacheError, Result};

/// Tuning of a catalog refresh.
#[derive(Debug, Clone)]
pub struct CatalogRefresh {
  /// Minimum delay between successive provider calls. The reference data
  /// changes rarely and the provider throttles bursts.
  pub page_delay: Duration,
}

impl Default for CatalogRefresh {
  fn default() -> Self {
    Self {
      page_delay: Duration::from_secs(1),
    }
  }
}

/// Ensure the catalog is populated: a no-op on a warm cache unless `force`,
/// otherwise a full sweep of all (tier, class) pages followed by one atomic
/// replace. Nothing is persisted if any page fails.
pub async fn ensure_catalog<S, P>(
  store: &S,
  provider: &P,
  session: &Session,
  force: bool,
  options: &CatalogRefresh,
) -> Result<(), S::Error, P::Error>
where
  S: TreeStore,
  P: CatalogProvider,
{
  if !force && store.has_catalog().await.map_err(CacheError::Store)? {
    debug!("catalog cache hit");
    return Ok(());
  }

  info!("fetching the full catalog, one page per tier and class");

  let mut vehicles: Vec<Vehicle> = Vec::new();
  let mut edges: Vec<TreeEdge> = Vec::new();
  let mut first_page = true;

  for tier in 1..=MAX_TIER {
    for class in VehicleClass::ALL {
      if !first_page {
        tokio::time::sleep(options.page_delay).await;
      }
      first_page = false;

      let page = provider
        .vehicles_page(session, tier, class)
        .await
        .map_err(CacheError::Provider)?;

      for record in page {
        let (vehicle, mut record_edges) = fold_record(session, record);
        vehicles.push(vehicle);
        edges.append(&mut record_edges);
      }
    }
  }

  info!(
    vehicles = vehicles.len(),
    edges = edges.len(),
    "catalog fetched; replacing the cached copy"
  );
  store
    .replace_catalog(vehicles, edges)
    .await
    .map_err(CacheError::Store)
}

/// Fold one raw catalog record into a persisted [`Vehicle`] plus the
/// research edges leaving it.
///
/// The unlock XP is taken from the first predecessor entry only. A vehicle
/// with several predecessors therefore gets the cost of one of them,
/// arbitrarily but deterministically — a known inaccuracy inherited from the
/// upstream data model.
pub(crate) fn fold_record(
  session: &Session,
  record: CatalogRecord,
) -> (Vehicle, Vec<TreeEdge>) {
  let price_xp = record
    .unlock_costs
    .first()
    .map(|(_, xp)| *xp)
    .unwrap_or(0);

  let mut elite_module_xp = 0;
  let mut elite_module_cost = 0;
  for module in &record.modules {
    if !module.is_default {
      elite_module_xp += module.price_xp;
      elite_module_cost += module.price_credit;
    }
  }

  let mut elite_successor_xp = 0;
  let mut edges = Vec::with_capacity(record.successors.len());
  for (successor, xp) in &record.successors {
    elite_successor_xp += xp;
    edges.push(TreeEdge {
      predecessor: record.id,
      successor:   *successor,
    });
  }

  let url = format!(
    "https://{}/{}/tankopedia/{}-{}/",
    session.realm.portal_host(),
    session.language,
    record.id,
    record.tag,
  );

  let vehicle = Vehicle {
    id:                 record.id,
    class:              record.class,
    nation:             record.nation,
    tier:               record.tier,
    tag:                record.tag,
    name:               record.name,
    premium:            record.premium,
    gift:               record.gift,
    wheeled:            record.wheeled,
    hit_points:         record.hit_points,
    price_xp,
    price_credit:       record.price_credit,
    price_gold:         record.price_gold,
    elite_module_xp,
    elite_module_cost,
    elite_successor_xp,
    description:        record.description,
    url,
  };

  (vehicle, edges)
}
