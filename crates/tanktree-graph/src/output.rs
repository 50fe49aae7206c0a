//! Renderer adapter: writes the graph description and optionally invokes the
//! external Graphviz `dot` renderer.

use std::{
  io::Write as _,
  path::{Path, PathBuf},
};

use tokio::process::Command;
use tracing::info;

use crate::error::RenderError;

/// Image formats the external renderer is invoked for.
pub const RENDER_FORMATS: &[&str] = &["png", "jpg", "svg", "ps", "json"];

// ─── Destination ─────────────────────────────────────────────────────────────

/// Where the graph description goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
  /// Print the description to standard output; never render.
  Stdout,
  /// Write `<path>.gv`; render to `<path>` when its extension is supported.
  File(String),
}

impl Destination {
  /// `.`, `..` and the empty string mean standard output.
  pub fn parse(raw: &str) -> Self {
    match raw {
      "" | "." | ".." => Destination::Stdout,
      path => Destination::File(path.to_string()),
    }
  }

  /// Path of the description file, when one is written.
  pub fn description_path(&self) -> Option<PathBuf> {
    match self {
      Destination::Stdout => None,
      Destination::File(path) => Some(PathBuf::from(format!("{path}.gv"))),
    }
  }
}

// ─── Writing ─────────────────────────────────────────────────────────────────

/// Write the description to the destination. Returns the path of the
/// written `.gv` file, or `None` for standard output.
pub async fn write_description(
  dot: &str,
  destination: &Destination,
) -> Result<Option<PathBuf>, RenderError> {
  match destination {
    Destination::Stdout => {
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(dot.as_bytes())?;
      stdout.write_all(b"\n")?;
      Ok(None)
    }
    Destination::File(_) => {
      let path = destination
        .description_path()
        .ok_or(RenderError::MissingDestination)?;
      tokio::fs::write(&path, dot).await?;
      info!(path = %path.display(), "graph description written");
      Ok(Some(path))
    }
  }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Invoke the external renderer on the previously written description.
///
/// Success iff `dot` exits cleanly. An unsupported extension is reported as
/// an error without invoking anything; the `.gv` file is left on disk either
/// way, for diagnosis.
pub async fn render_image(
  destination: &Destination,
) -> Result<PathBuf, RenderError> {
  let Destination::File(path) = destination else {
    return Err(RenderError::MissingDestination);
  };

  let format = Path::new(path)
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| e.trim().to_lowercase())
    .unwrap_or_default();
  if !RENDER_FORMATS.contains(&format.as_str()) {
    return Err(RenderError::UnsupportedFormat(format));
  }

  let description = format!("{path}.gv");
  info!(%description, output = %path, %format, "invoking renderer");

  let status = Command::new("dot")
    .arg(format!("-T{format}"))
    .arg(&description)
    .arg("-o")
    .arg(path)
    .status()
    .await?;

  if status.success() {
    Ok(PathBuf::from(path))
  } else {
    Err(RenderError::RendererFailed(status))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
