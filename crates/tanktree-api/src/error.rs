//! Error type for `tanktree-api`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tanktree_core::Error),

  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("API returned HTTP {0}")]
  Http(reqwest::StatusCode),

  #[error("API status {status:?}: {message}")]
  Status { status: String, message: String },

  #[error("malformed response: {0}")]
  Malformed(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
