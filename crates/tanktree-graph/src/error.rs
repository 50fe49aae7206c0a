//! Error types for `tanktree-graph`.

use thiserror::Error;

/// Failure while building a graph model, generic over the store error.
#[derive(Debug, Error)]
pub enum GraphError<SE>
where
  SE: std::error::Error + 'static,
{
  #[error("store error: {0}")]
  Store(#[source] SE),

  /// The player has no nation with enough battles — nothing to draw.
  #[error("no battled nation above the threshold")]
  NoBattledNations,
}

/// Failure while writing or rendering the graph description.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("a file destination is required for rendering")]
  MissingDestination,

  #[error("unsupported output format: {0:?}")]
  UnsupportedFormat(String),

  #[error("renderer exited with {0}")]
  RendererFailed(std::process::ExitStatus),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}
