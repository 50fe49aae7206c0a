//! Tree model builder and renderer adapter.
//!
//! Turns the cached catalog and a player's stat rows into a Graphviz DOT
//! description: one cluster per battled nation, styled nodes, same-tier rank
//! constraints, research edges, and an aggregate title. The output is
//! deterministic — rebuilding on unchanged store data yields byte-identical
//! text.

mod attrs;
mod builder;
mod output;

pub mod error;

pub use attrs::AttrList;
pub use builder::{build_graph, GraphOptions, TechTreeGraph};
pub use error::{GraphError, RenderError};
pub use output::{render_image, write_description, Destination, RENDER_FORMATS};
