//! Player resolver and per-player stats cache manager.

use tracing::{debug, info};

use tanktree_core::{
  player::{AccountId, PlayerIdentity},
  provider::AccountProvider,
  session::Session,
  store::{NewStat, TreeStore},
};

use crate::error::{CacheError, Result};

/// Resolve a player name to its stable account id.
///
/// Served from the cache (case-insensitive within the realm) unless `force`;
/// otherwise one exact-match search, which must yield a single account.
pub async fn resolve_player<S, P>(
  store: &S,
  provider: &P,
  session: &Session,
  name: &str,
  force: bool,
) -> Result<AccountId, S::Error, P::Error>
where
  S: TreeStore,
  P: AccountProvider,
{
  if !force {
    if let Some(identity) = store
      .find_player(session.realm, name)
      .await
      .map_err(CacheError::Store)?
    {
      debug!(%name, account = %identity.account_id, "player cache hit");
      return Ok(identity.account_id);
    }
  }

  let account = provider
    .find_account(session, name)
    .await
    .map_err(CacheError::Provider)?
    .ok_or_else(|| CacheError::PlayerNotFound(name.to_string()))?;

  info!(%name, account = %account.account_id, "player resolved");
  store
    .upsert_player(PlayerIdentity {
      realm:      session.realm,
      account_id: account.account_id,
      name:       name.to_string(),
    })
    .await
    .map_err(CacheError::Store)?;

  Ok(account.account_id)
}

/// Ensure the per-vehicle stat rows of `account` are populated: a no-op on
/// a warm cache unless `force`, otherwise one provider call and one atomic
/// scoped replace (the store derives the win rates).
pub async fn ensure_stats<S, P>(
  store: &S,
  provider: &P,
  session: &Session,
  account: AccountId,
  force: bool,
) -> Result<(), S::Error, P::Error>
where
  S: TreeStore,
  P: AccountProvider,
{
  if !force
    && store
      .has_stats(session.realm, account)
      .await
      .map_err(CacheError::Store)?
  {
    debug!(%account, "stats cache hit");
    return Ok(());
  }

  info!(%account, "fetching the vehicles of the player");
  let owned = provider
    .owned_vehicles(session, account)
    .await
    .map_err(CacheError::Provider)?;

  let rows = owned
    .into_iter()
    .map(|r| NewStat {
      vehicle: r.vehicle,
      battles: r.battles,
      wins:    r.wins,
      mastery: r.mastery,
    })
    .collect();

  store
    .replace_stats(session.realm, account, rows)
    .await
    .map_err(CacheError::Store)
}
