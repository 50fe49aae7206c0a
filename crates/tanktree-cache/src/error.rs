//! Error type for `tanktree-cache`, generic over the store and provider
//! error types it wraps.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError<SE, PE>
where
  SE: std::error::Error + 'static,
  PE: std::error::Error + 'static,
{
  #[error("store error: {0}")]
  Store(#[source] SE),

  #[error("provider error: {0}")]
  Provider(#[source] PE),

  /// The exact-match search returned anything but a single account.
  #[error("player not found: {0:?}")]
  PlayerNotFound(String),
}

pub type Result<T, SE, PE> = std::result::Result<T, CacheError<SE, PE>>;
