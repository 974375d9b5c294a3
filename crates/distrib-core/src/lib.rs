//! distrib-core — shared types, record loading, and configuration.
//!
//! Parses the two flat input tables (files and nodes) into typed records
//! and the optional `distrib.toml` into [`DistribConfig`].

pub mod config;
pub mod error;
pub mod loader;
pub mod types;

pub use config::{DistribConfig, OutputFormat};
pub use error::{LoadError, LoadResult};
pub use loader::{Inputs, load_inputs, load_items, load_nodes, parse_items, parse_nodes};
pub use types::*;
