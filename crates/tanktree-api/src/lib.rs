//! HTTP client for the Wargaming public API.
//!
//! Implements the [`tanktree_core::provider`] traits over the realm-specific
//! JSON endpoints. All calls are GET-style with no side effects; the caller
//! (the cache layer) is responsible for pacing and persistence.

mod client;
mod wire;

pub mod error;

pub use client::WargamingClient;
pub use error::{Error, Result};
