//! Trellis configuration.
//!
//! One TOML file, every field defaulted. The file is found by, in order:
//!
//! 1. `--config` (or `TRELLIS_CONFIG`, which clap folds into the same flag)
//! 2. `./trellis.toml`
//! 3. `<platform config dir>/trellis/config.toml`
//!
//! A missing file means defaults, unless it was named explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trellis_content::ScanOptions;
use trellis_core::{Error, Result};
use trellis_graph::{ImpactOptions, ResolveOptions, DEFAULT_MERMAID_EDGE_LIMIT, MAX_RELATED};

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "trellis";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "trellis.toml";

/// `[graph]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub include_mentions: bool,
    pub mermaid_edge_limit: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            include_mentions: true,
            mermaid_edge_limit: DEFAULT_MERMAID_EDGE_LIMIT,
        }
    }
}

/// `[related]` table: defaults for `trellis related`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedSettings {
    pub depth: usize,
    pub limit: usize,
    pub priority_filter: bool,
}

impl Default for RelatedSettings {
    fn default() -> Self {
        Self {
            depth: 1,
            limit: MAX_RELATED,
            priority_filter: false,
        }
    }
}

/// Complete configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// Documents root, relative to the working directory unless absolute.
    pub root: PathBuf,
    pub scan: ScanOptions,
    pub graph: GraphSettings,
    pub impact: ImpactOptions,
    pub related: RelatedSettings,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            scan: ScanOptions::default(),
            graph: GraphSettings::default(),
            impact: ImpactOptions::default(),
            related: RelatedSettings::default(),
        }
    }
}

impl TrellisConfig {
    /// `<platform config dir>/trellis/config.toml`, if the platform has one.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The config file that [`load`](Self::load) would read.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::default_config_path()
    }

    /// Loads the resolved config file, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing or any file found
    /// does not parse.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.is_file() => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            _ => {
                log::debug!("No config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Resolver options seeded from the `[related]` table.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            depth: self.related.depth,
            limit: self.related.limit,
            priority_filter: self.related.priority_filter,
            ..ResolveOptions::default()
        }
    }
}
