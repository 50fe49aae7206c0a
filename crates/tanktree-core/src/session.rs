//! Session — the immutable request context threaded through every operation.
//!
//! A session pins a realm (regional server group) and a display language.
//! It replaces any notion of shared mutable "current server / current
//! language" state: once built, a session never changes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Realm ───────────────────────────────────────────────────────────────────

/// A regional game server grouping, identified by its top-level domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
  Eu,
  Com,
  Ru,
  Asia,
}

impl Realm {
  /// Top-level domain suffix used in API and portal hosts.
  pub fn tld(self) -> &'static str {
    match self {
      Realm::Eu   => "eu",
      Realm::Com  => "com",
      Realm::Ru   => "ru",
      Realm::Asia => "asia",
    }
  }

  /// Host of the JSON API for this realm.
  pub fn api_host(self) -> String {
    format!("api.worldoftanks.{}", self.tld())
  }

  /// Host of the public portal, used for canonical vehicle URLs.
  pub fn portal_host(self) -> String {
    format!("worldoftanks.{}", self.tld())
  }
}

impl fmt::Display for Realm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tld())
  }
}

impl FromStr for Realm {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    // "us" is the colloquial name of the "com" realm.
    match s.trim().to_lowercase().as_str() {
      "eu"          => Ok(Realm::Eu),
      "com" | "us"  => Ok(Realm::Com),
      "ru"          => Ok(Realm::Ru),
      "asia"        => Ok(Realm::Asia),
      other         => Err(Error::UnknownRealm(other.to_string())),
    }
  }
}

// ─── Language ────────────────────────────────────────────────────────────────

/// Display languages accepted by the remote API.
const SUPPORTED_LANGUAGES: &[&str] = &[
  "en", "ru", "pl", "de", "fr", "es", "zh-cn", "zh-tw", "tr", "cs", "th",
  "vi", "ko",
];

/// A display language code, validated against the fixed supported set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
  /// Validate `code` (case-insensitive). An empty code defaults to `en`.
  pub fn new(code: &str) -> Result<Self> {
    let code = code.trim().to_lowercase();
    if code.is_empty() {
      return Ok(Language("en".to_string()));
    }
    if SUPPORTED_LANGUAGES.contains(&code.as_str()) {
      Ok(Language(code))
    } else {
      Err(Error::UnsupportedLanguage(code))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for Language {
  fn default() -> Self {
    Language("en".to_string())
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Immutable context value carried through catalog, player and graph
/// operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub realm:    Realm,
  pub language: Language,
}

impl Session {
  pub fn new(realm: Realm, language: Language) -> Self {
    Self { realm, language }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn realm_us_is_an_alias_of_com() {
    assert_eq!("us".parse::<Realm>().unwrap(), Realm::Com);
    assert_eq!("COM".parse::<Realm>().unwrap(), Realm::Com);
  }

  #[test]
  fn realm_rejects_unknown_codes() {
    assert!(matches!(
      "mars".parse::<Realm>(),
      Err(Error::UnknownRealm(_))
    ));
  }

  #[test]
  fn language_defaults_to_english_when_empty() {
    assert_eq!(Language::new("").unwrap().as_str(), "en");
  }

  #[test]
  fn language_rejects_unsupported_codes() {
    assert!(matches!(
      Language::new("xx"),
      Err(Error::UnsupportedLanguage(_))
    ));
  }

  #[test]
  fn realm_hosts() {
    assert_eq!(Realm::Eu.api_host(), "api.worldoftanks.eu");
    assert_eq!(Realm::Asia.portal_host(), "worldoftanks.asia");
  }
}
