//! Error types for `tanktree-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown realm: {0:?}")]
  UnknownRealm(String),

  #[error("unsupported language: {0:?}")]
  UnsupportedLanguage(String),

  #[error("tier out of range: {0} (expected 1..=10)")]
  TierOutOfRange(i64),

  #[error("unknown vehicle class code: {0:?}")]
  UnknownClassCode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
