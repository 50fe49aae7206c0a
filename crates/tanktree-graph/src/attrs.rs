//! Ordered attribute list for DOT node statements.
//!
//! Serialization rule: each entry renders as `key = "value"` with embedded
//! quotes escaped, entries joined with `"; "`. Insertion order is preserved.

/// An ordered `key = "value"` association list.
#[derive(Debug, Default)]
pub struct AttrList(Vec<(&'static str, String)>);

impl AttrList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
    self.0.push((key, value.into()));
  }

  /// Render the list for use inside a DOT `[...]` bracket.
  pub fn to_dot(&self) -> String {
    self
      .0
      .iter()
      .map(|(k, v)| format!("{} = \"{}\"", k, v.replace('"', "\\\"")))
      .collect::<Vec<_>>()
      .join("; ")
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
