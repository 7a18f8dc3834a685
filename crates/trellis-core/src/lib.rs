//! Trellis Core: shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all Trellis crates.
//! It has no internal Trellis dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`document`]: The scanned document record handed to the graph builder
//! - [`util`]: Path and ID utilities

pub mod document;
pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use document::ScannedDocument;
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::ids::{id_from_path, normalize_path, path_has_suffix};
