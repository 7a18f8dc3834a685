//! Handlers for the `trellis config` subcommands.
//!
//! Each handler returns the text to print on stdout. Values are addressed by
//! dotted keys into the TOML tree (`scan.concurrency`, `related.depth`).

use crate::cli::ConfigAction;
use crate::config::{TrellisConfig, PROJECT_NAME};
use std::path::PathBuf;
use trellis_core::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Runs a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: &ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, key, value),
        ConfigAction::Init { file, force } => {
            cmd_config_init(file.as_deref().or(config_path), *force)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// The resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<String> {
    let path = TrellisConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    if !path.exists() {
        log::warn!("{} does not exist; run `{PROJECT_NAME} config init` to create it", path.display());
    }
    Ok(path.display().to_string())
}

/// A configuration value by dotted key, defaults included.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = TrellisConfig::load(config_path)?;
    let tree = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&tree, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Sets a value by dotted key in an existing config file.
///
/// The edited file must still describe a valid configuration.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<String> {
    let path = TrellisConfig::resolve_config_path(config_path)
        .filter(|p| p.is_file())
        .ok_or_else(|| {
            Error::config(format!(
                "No config file to edit; run `{PROJECT_NAME} config init` first"
            ))
        })?;

    let text = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut tree: toml::Value = toml::from_str(&text)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    set_nested_value(&mut tree, key, parse_value(value))?;

    tree.clone()
        .try_into::<TrellisConfig>()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    let updated = toml::to_string_pretty(&tree).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, updated).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("{key} = {value} ({})", path.display()))
}

/// Writes a default configuration file to `file`, or the platform default.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<String> {
    let target = file
        .map(PathBuf::from)
        .or_else(TrellisConfig::default_config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if target.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists; pass --force to replace it",
            target.display()
        )));
    }
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
    }

    let contents = TrellisConfig::default().to_toml_string()?;
    std::fs::write(&target, contents).map_err(|e| Error::io_with_path(e, &target))?;
    Ok(format!("Wrote default configuration to {}", target.display()))
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// The value at a dotted key, if every segment resolves.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Writes `value` at a dotted key, creating missing tables on the way.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(Error::config(format!("Invalid key: '{key}'")));
    }
    let Some(leaf) = segments.pop() else {
        return Err(Error::config("Empty key"));
    };

    let mut table = root
        .as_table_mut()
        .ok_or_else(|| Error::config("Configuration root is not a table"))?;
    for segment in segments {
        table = table
            .entry(segment)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{segment}' in '{key}' is not a table")))?;
    }
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Reads a command-line value as bool, then integer, then float, then string.
pub fn parse_value(raw: &str) -> toml::Value {
    use toml::Value;

    raw.parse::<bool>()
        .map(Value::Boolean)
        .or_else(|_| raw.parse::<i64>().map(Value::Integer))
        .or_else(|_| raw.parse::<f64>().map(Value::Float))
        .unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Renders a value for stdout: strings bare, arrays one item per line.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(format_toml_value)
            .collect::<Vec<_>>()
            .join("\n"),
        toml::Value::Table(table) => toml::to_string_pretty(table).unwrap_or_default(),
        scalar => scalar.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
