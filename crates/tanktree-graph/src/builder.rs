//! The tree model builder: derives the complete DOT description of a
//! player's tech tree from the cached store data.

use std::collections::{HashMap, HashSet};

use tracing::info;

use tanktree_core::{
  player::{AccountId, VehicleStat},
  session::Session,
  store::TreeStore,
  vehicle::{Vehicle, VehicleId, MAX_TIER},
};

use crate::{attrs::AttrList, error::GraphError};

/// Font able to display the class glyphs and the star marker.
const FONT: &str = "Segoe UI Symbol";

const ROMAN: [&str; 10] =
  ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Node fill per mastery rank 0..=4; rank 0 has no fill. Out-of-range ranks
/// fall back to rank 0.
const MASTERY_FILLS: [&str; 5] = ["", "#CAA236", "#E0E0E0", "#FFFF00", "green"];

/// Pale fill for catalog vehicles the player does not own.
const UNOWNED_FILL: &str = "#FFE1E1";

// ─── Options and result ──────────────────────────────────────────────────────

/// Display options of a graph build.
#[derive(Debug, Clone)]
pub struct GraphOptions {
  /// A nation appears only if the player has a vehicle of it with at least
  /// this many battles.
  pub min_battles:     u32,
  /// `true`: keep special (premium/reward) vehicles the player owns and
  /// drop only unreachable ones. `false`: hide every non-standard vehicle.
  pub include_special: bool,
  /// Fill nodes with the mastery-rank color scale.
  pub show_mastery:    bool,
  /// Emit the invisible I→…→X chain anchoring a tier axis.
  pub show_tier_guide: bool,
}

impl Default for GraphOptions {
  fn default() -> Self {
    Self {
      min_battles:     0,
      include_special: true,
      show_mastery:    true,
      show_tier_guide: true,
    }
  }
}

/// A fully assembled graph description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechTreeGraph {
  /// The DOT text, byte-identical across rebuilds on unchanged data.
  pub dot:   String,
  /// Vehicle ids in node emission order.
  pub nodes: Vec<VehicleId>,
}

fn node_id(id: VehicleId) -> String {
  format!("n{id}")
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build the graph description for one player.
///
/// Fails with [`GraphError::NoBattledNations`] when no nation passes the
/// battle threshold. The aggregate title is guarded against a zero battle
/// total (renders as 0.0%).
pub async fn build_graph<S>(
  store: &S,
  session: &Session,
  account: AccountId,
  player_name: &str,
  options: &GraphOptions,
) -> Result<TechTreeGraph, GraphError<S::Error>>
where
  S: TreeStore,
{
  let nations = store
    .battled_nations(session.realm, account, options.min_battles)
    .await
    .map_err(GraphError::Store)?;
  if nations.is_empty() {
    return Err(GraphError::NoBattledNations);
  }

  let owned: HashMap<VehicleId, VehicleStat> = store
    .stats(session.realm, account)
    .await
    .map_err(GraphError::Store)?
    .into_iter()
    .map(|s| (s.vehicle, s))
    .collect();

  // Already ordered by (nation, tier, class) — the cluster layout order.
  let vehicles = store.vehicles().await.map_err(GraphError::Store)?;

  let excluded: HashSet<VehicleId> = if options.include_special {
    store
      .unrooted_unowned(session.realm, account)
      .await
      .map_err(GraphError::Store)?
  } else {
    store.non_standard().await.map_err(GraphError::Store)?
  }
  .into_iter()
  .collect();

  info!(
    nations = nations.len(),
    vehicles = vehicles.len(),
    excluded = excluded.len(),
    "building the graph description"
  );

  let mut dot = String::from("digraph techtree {");
  let mut nodes: Vec<VehicleId> = Vec::new();

  if options.show_tier_guide {
    dot.push_str(
      "\n{ node [shape = plaintext; fontsize = 16]; \
       I -> II -> III -> IV -> V -> VI -> VII -> VIII -> IX -> X }",
    );
  }

  let mut total_battles: u64 = 0;
  let mut total_wins: u64 = 0;

  for nation in &nations {
    dot.push_str(&format!("\nsubgraph cluster_{nation} {{"));
    dot.push_str(&format!("label = \"{}\";", nation.to_uppercase()));

    // Same-tier nodes of a nation are pinned to the same visual rank.
    let mut ranks: Vec<Vec<String>> = vec![Vec::new(); MAX_TIER as usize + 1];

    for vehicle in vehicles.iter().filter(|v| &v.nation == nation) {
      if excluded.contains(&vehicle.id) {
        continue;
      }

      let id = node_id(vehicle.id);
      let stat = owned.get(&vehicle.id);
      if let Some(stat) = stat {
        total_battles += u64::from(stat.battles);
        total_wins += u64::from(stat.wins);
      }

      let attrs = node_attrs(vehicle, stat, options.show_mastery);
      ranks[vehicle.tier as usize].push(id.clone());
      dot.push_str(&format!("\n{} [{}];", id, attrs.to_dot()));
      nodes.push(vehicle.id);
    }

    for rank in &ranks {
      if !rank.is_empty() {
        dot.push_str(&format!("\n{{rank = same; {}}}", rank.join("; ")));
      }
    }
    dot.push_str("\n}");
  }

  // Research edges leaving a battled nation. An edge may point at a vehicle
  // that was excluded from display; it is emitted all the same.
  let nation_of: HashMap<VehicleId, &str> = vehicles
    .iter()
    .map(|v| (v.id, v.nation.as_str()))
    .collect();
  let battled: HashSet<&str> = nations.iter().map(String::as_str).collect();

  for edge in store.edges().await.map_err(GraphError::Store)? {
    if let Some(nation) = nation_of.get(&edge.predecessor) {
      if battled.contains(nation) {
        dot.push_str(&format!(
          "\n{} -> {};",
          node_id(edge.predecessor),
          node_id(edge.successor)
        ));
      }
    }
  }

  // Guarded: a graph whose owned nodes total zero battles renders 0.0%.
  let percent = if total_battles > 0 {
    100.0 * total_wins as f64 / total_battles as f64
  } else {
    0.0
  };
  dot.push_str(&format!(
    "\nlabel = <<B>{}'s tech tree</B><BR/>{} wins in {} battles ({:.1}%)>;",
    player_name, total_wins, total_battles, percent
  ));
  dot.push_str("\n}");

  Ok(TechTreeGraph { dot, nodes })
}

/// Styling of one vehicle node.
fn node_attrs(
  vehicle: &Vehicle,
  stat: Option<&VehicleStat>,
  show_mastery: bool,
) -> AttrList {
  let mut attrs = AttrList::new();

  let mut label = format!(
    "{} {} {}{}",
    ROMAN[vehicle.tier as usize - 1],
    vehicle.class.glyph(),
    vehicle.name,
    if vehicle.premium { " &#x2605;" } else { "" },
  );
  if let Some(stat) = stat {
    label.push_str(&format!(
      "\\n{} / {} = {:.1} %",
      stat.wins, stat.battles, stat.win_rate
    ));
  }
  attrs.push("label", label);

  let mut tooltip = format!("Tank {}\\n", vehicle.id);
  if vehicle.price_gold + vehicle.price_credit == 0 {
    tooltip.push_str("With obligations");
  } else if vehicle.price_gold > 0 {
    tooltip.push_str(&format!("Gold {}", vehicle.price_gold));
  } else {
    tooltip.push_str(&format!(
      "Cost = {} (base) + {} (equipments)",
      vehicle.price_credit, vehicle.elite_module_cost
    ));
  }
  if vehicle.price_xp + vehicle.elite_module_xp + vehicle.elite_successor_xp > 0
  {
    tooltip.push_str(&format!(
      "\\nXP = {} (base) + {} (equipments) + {} (tanks)",
      vehicle.price_xp, vehicle.elite_module_xp, vehicle.elite_successor_xp
    ));
  }
  attrs.push("tooltip", tooltip);

  attrs.push("fontname", FONT);
  attrs.push("color", if stat.is_some() { "green" } else { "red" });
  attrs.push("penwidth", "2.5");
  attrs.push("shape", "box");

  if show_mastery {
    let fill = match stat {
      Some(stat) => MASTERY_FILLS
        .get(stat.mastery as usize)
        .copied()
        .unwrap_or(MASTERY_FILLS[0]),
      None => UNOWNED_FILL,
    };
    if !fill.is_empty() {
      attrs.push("style", "filled");
      attrs.push("fillcolor", fill);
    }
  }

  attrs.push("URL", vehicle.url.clone());
  attrs
}
