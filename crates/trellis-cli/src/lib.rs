//! # trellis-cli
//!
//! The `trellis` command: scans a documentation tree, builds the relationship
//! graph and answers queries over it.
//!
//! - `graph`: the whole graph as JSON or a Mermaid flowchart
//! - `impact`: hop-ranked review list for a changed document
//! - `related`: configurable related-document resolution
//! - `describe`: one document and its edges
//! - `lint`: dangling edges, orphans, cycles and document warnings
//! - `config`: inspect and edit the TOML configuration

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command, ConfigAction};
pub use commands::{CommandOutput, load_graph};
pub use config::TrellisConfig;
