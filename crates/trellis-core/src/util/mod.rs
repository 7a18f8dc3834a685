//! Utility modules for path handling and ID computation.
//!
//! # Modules
//!
//! - [`ids`]: Document ID and stored-path helpers

pub mod ids;
