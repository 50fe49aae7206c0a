//! Cache managers: keep the local store in sync with the remote providers.
//!
//! The catalog is fetched once and then served from the store until an
//! explicit refresh; player identities and per-vehicle stats are cached per
//! (realm, account). All refreshes are all-or-nothing — a provider failure
//! mid-sweep aborts without persisting anything from that sweep.

mod catalog;
mod player;

pub mod error;

pub use catalog::{ensure_catalog, CatalogRefresh};
pub use error::CacheError;
pub use player::{ensure_stats, resolve_player};
