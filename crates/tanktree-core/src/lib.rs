//! Core types and trait definitions for the tanktree tech-tree generator.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod player;
pub mod provider;
pub mod session;
pub mod store;
pub mod vehicle;

pub use error::{Error, Result};
