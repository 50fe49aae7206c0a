//! [`WargamingClient`] — reqwest-based implementation of the provider traits.

use std::{collections::BTreeMap, time::Duration};

use reqwest::Client;
use tracing::debug;

use tanktree_core::{
  player::AccountId,
  provider::{AccountProvider, AccountRecord, CatalogProvider, CatalogRecord, OwnedRecord},
  session::Session,
  vehicle::VehicleClass,
};

use crate::{
  wire::{Envelope, WireAccount, WireOwned, WireVehicle},
  Error, Result,
};

/// HTTP client for one registered API application.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct WargamingClient {
  client:         Client,
  application_id: String,
}

impl WargamingClient {
  pub fn new(application_id: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      application_id: application_id.into(),
    })
  }

  fn endpoint(&self, session: &Session, path: &str) -> String {
    format!("https://{}/wot/{}/", session.realm.api_host(), path)
  }

  async fn get_envelope<T: serde::de::DeserializeOwned>(
    &self,
    url: String,
    query: &[(&str, String)],
  ) -> Result<T> {
    let resp = self.client.get(&url).query(query).send().await?;
    if !resp.status().is_success() {
      return Err(Error::Http(resp.status()));
    }
    let env: Envelope<T> = resp.json().await?;
    env.into_data()
  }
}

// ─── CatalogProvider ─────────────────────────────────────────────────────────

impl CatalogProvider for WargamingClient {
  type Error = Error;

  async fn vehicles_page(
    &self,
    session: &Session,
    tier: u8,
    class: VehicleClass,
  ) -> Result<Vec<CatalogRecord>> {
    debug!(%tier, class = class.code(), "fetching catalog page");

    let data: BTreeMap<String, WireVehicle> = self
      .get_envelope(
        self.endpoint(session, "encyclopedia/vehicles"),
        &[
          ("application_id", self.application_id.clone()),
          ("language", session.language.to_string()),
          ("tier", tier.to_string()),
          ("type", class.code().to_string()),
        ],
      )
      .await?;

    data
      .into_values()
      .map(WireVehicle::into_record)
      .collect()
  }
}

// ─── AccountProvider ─────────────────────────────────────────────────────────

impl AccountProvider for WargamingClient {
  type Error = Error;

  async fn find_account(
    &self,
    session: &Session,
    name: &str,
  ) -> Result<Option<AccountRecord>> {
    debug!(%name, "searching account");

    let mut accounts: Vec<WireAccount> = self
      .get_envelope(
        self.endpoint(session, "account/list"),
        &[
          ("application_id", self.application_id.clone()),
          ("language", session.language.to_string()),
          ("search", name.to_string()),
          ("type", "exact".to_string()),
          ("limit", "1".to_string()),
        ],
      )
      .await?;

    // Anything but exactly one exact match is a miss.
    if accounts.len() == 1 {
      Ok(Some(accounts.remove(0).into_record()))
    } else {
      Ok(None)
    }
  }

  async fn owned_vehicles(
    &self,
    session: &Session,
    account: AccountId,
  ) -> Result<Vec<OwnedRecord>> {
    debug!(%account, "fetching owned vehicles");

    let mut data: BTreeMap<String, Vec<WireOwned>> = self
      .get_envelope(
        self.endpoint(session, "account/tanks"),
        &[
          ("application_id", self.application_id.clone()),
          ("language", session.language.to_string()),
          ("account_id", account.to_string()),
        ],
      )
      .await?;

    let rows = data
      .remove(&account.to_string())
      .ok_or(Error::Malformed("account missing from tanks response"))?;

    Ok(rows.into_iter().map(WireOwned::into_record).collect())
  }
}
