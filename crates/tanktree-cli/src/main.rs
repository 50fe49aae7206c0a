//! `tanktree` — personalized tech tree graphs from cached game data.
//!
//! # Usage
//!
//! ```
//! tanktree --player Pamboum tree.png
//! tanktree --realm us --player SomeTanker --min-battles 20 .
//! tanktree --config ~/.config/tanktree/config.toml --player Pamboum tree.svg
//! ```
//!
//! Passing `.` (or `..`, or nothing) as the destination prints the graph
//! description to standard output instead of rendering an image.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use tanktree_api::WargamingClient;
use tanktree_cache::{ensure_catalog, ensure_stats, resolve_player, CatalogRefresh};
use tanktree_core::session::{Language, Realm, Session};
use tanktree_graph::{
  build_graph, render_image, write_description, Destination, GraphOptions,
  RenderError,
};
use tanktree_store_sqlite::SqliteStore;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tanktree", about = "Draw a player's personalized tech tree")]
struct Args {
  /// Output image path; its extension picks the format (png, jpg, svg, ps,
  /// json). `.` prints the graph description to stdout instead.
  #[arg(value_name = "DEST", default_value = ".")]
  destination: String,

  /// Player name (exact, case-insensitive).
  #[arg(short, long)]
  player: String,

  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Realm: eu, com (alias us), ru or asia.
  #[arg(short, long, env = "TANKTREE_REALM")]
  realm: Option<String>,

  /// Display language for vehicle names.
  #[arg(short, long, env = "TANKTREE_LANGUAGE")]
  language: Option<String>,

  /// Registered application id for the remote API.
  #[arg(long, env = "TANKTREE_APP_ID")]
  app_id: Option<String>,

  /// Path of the cache database.
  #[arg(long, env = "TANKTREE_DB")]
  db: Option<String>,

  /// Re-fetch the vehicle catalog (implies --refresh-player).
  #[arg(long)]
  refresh_catalog: bool,

  /// Re-fetch the player's account id and stats.
  #[arg(long)]
  refresh_player: bool,

  /// Hide nations without a vehicle at this many battles.
  #[arg(long, default_value_t = 0)]
  min_battles: u32,

  /// Hide every premium, gift or otherwise non-standard vehicle.
  #[arg(long)]
  no_special: bool,

  /// Do not color nodes by mastery badge.
  #[arg(long)]
  no_mastery: bool,

  /// Do not draw the I..X tier axis.
  #[arg(long)]
  no_tier_guide: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  app_id:   String,
  #[serde(default)]
  realm:    String,
  #[serde(default)]
  language: String,
  #[serde(default)]
  db:       String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr; stdout is reserved for the graph description.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let app_id = args
    .app_id
    .or_else(|| (!file_cfg.app_id.is_empty()).then(|| file_cfg.app_id.clone()))
    .unwrap_or_default();
  if app_id.trim().is_empty() {
    bail!(
      "no application id; pass --app-id, set TANKTREE_APP_ID, or put app_id \
       in the config file"
    );
  }

  let realm: Realm = args
    .realm
    .or_else(|| (!file_cfg.realm.is_empty()).then(|| file_cfg.realm.clone()))
    .unwrap_or_else(|| "eu".to_string())
    .parse()?;
  let language = Language::new(
    &args
      .language
      .or_else(|| (!file_cfg.language.is_empty()).then(|| file_cfg.language.clone()))
      .unwrap_or_default(),
  )?;
  let session = Session::new(realm, language);

  let db = args
    .db
    .or_else(|| (!file_cfg.db.is_empty()).then(|| file_cfg.db.clone()))
    .unwrap_or_else(|| "tanktree.db".to_string());

  let store = SqliteStore::open(&db)
    .await
    .with_context(|| format!("opening cache database {db}"))?;
  let client = WargamingClient::new(app_id).context("building the API client")?;

  // A fresh catalog invalidates the derived stat rows too.
  let refresh_player = args.refresh_player || args.refresh_catalog;

  let account =
    resolve_player(&store, &client, &session, &args.player, refresh_player)
      .await
      .context("resolving the player")?;
  ensure_catalog(
    &store,
    &client,
    &session,
    args.refresh_catalog,
    &CatalogRefresh::default(),
  )
  .await
  .context("refreshing the catalog")?;
  ensure_stats(&store, &client, &session, account, refresh_player)
    .await
    .context("refreshing the player's stats")?;

  let options = GraphOptions {
    min_battles:     args.min_battles,
    include_special: !args.no_special,
    show_mastery:    !args.no_mastery,
    show_tier_guide: !args.no_tier_guide,
  };
  let graph = build_graph(&store, &session, account, &args.player, &options)
    .await
    .context("building the graph")?;

  let destination = Destination::parse(&args.destination);
  write_description(&graph.dot, &destination)
    .await
    .context("writing the graph description")?;

  if let Destination::File(_) = &destination {
    match render_image(&destination).await {
      Ok(path) => info!(path = %path.display(), "image rendered"),
      // The description file stays behind for manual rendering.
      Err(RenderError::UnsupportedFormat(ext)) => {
        warn!(%ext, "unsupported image format; wrote the description only")
      }
      Err(err) => warn!(%err, "rendering failed; the description was written"),
    }
  }

  Ok(())
}
