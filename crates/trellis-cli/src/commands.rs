//! Command implementations.
//!
//! Every query command scans the documents root, builds the graph once and
//! renders a single result. Commands return their stdout text and exit code
//! so they can be driven from tests without a process boundary.

use crate::cli::{Cli, Command, GraphFormat, RelatedFormat, ReportFormat};
use crate::config::TrellisConfig;
use crate::config_handlers::handle_config_command;
use crate::output;
use serde::Serialize;
use std::path::{Path, PathBuf};
use trellis_content::scan_directory;
use trellis_core::{Error, Result};
use trellis_graph::{
    analyze_impact, describe_node, lint, resolve, to_json, to_mermaid, BuildOutput, GraphBuilder,
    ImpactOptions, Relation, ResolveOptions,
};

/// Exit code when `lint --strict` finds warnings.
pub const LINT_FAILURE_CODE: u8 = 2;

/// Text for stdout plus the process exit code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub code: u8,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            code: 0,
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Runs a parsed command line.
///
/// Flags override the config file, which overrides built-in defaults.
pub async fn run(cli: &Cli) -> Result<CommandOutput> {
    match &cli.command {
        Command::Graph {
            format,
            edge_limit,
            no_mentions,
        } => {
            let (config, root) = settings(cli)?;
            let include_mentions = config.graph.include_mentions && !no_mentions;
            let built = load_graph(&root, &config, include_mentions).await?;
            let limit = edge_limit.unwrap_or(config.graph.mermaid_edge_limit);
            graph_command(&built, *format, limit)
        }
        Command::Impact {
            target,
            max_depth,
            format,
        } => {
            let (config, root) = settings(cli)?;
            let built = load_graph(&root, &config, config.graph.include_mentions).await?;
            let mut options = config.impact.clone();
            if let Some(depth) = max_depth {
                options.max_depth = *depth;
            }
            impact_command(&built, target, &options, *format)
        }
        Command::Related {
            target,
            depth,
            all,
            direction,
            relations,
            limit,
            priority_filter,
            format,
        } => {
            let (config, root) = settings(cli)?;
            let built = load_graph(&root, &config, config.graph.include_mentions).await?;
            let mut options = config.resolve_options();
            if let Some(depth) = depth {
                options.depth = *depth;
            }
            if let Some(limit) = limit {
                options.limit = *limit;
            }
            options.all = *all;
            options.direction = (*direction).into();
            options.priority_filter |= *priority_filter;
            if !relations.is_empty() {
                options.relations = relations.iter().copied().map(Relation::from).collect();
            }
            related_command(&built, target, &options, *format)
        }
        Command::Describe { target, format } => {
            let (config, root) = settings(cli)?;
            let built = load_graph(&root, &config, config.graph.include_mentions).await?;
            describe_command(&built, target, *format)
        }
        Command::Lint { strict, format } => {
            let (config, root) = settings(cli)?;
            let built = load_graph(&root, &config, config.graph.include_mentions).await?;
            lint_command(&built, *strict, *format)
        }
        Command::Config { action } => {
            let text = handle_config_command(cli.config.as_deref(), action)?;
            Ok(CommandOutput::success(with_newline(text)))
        }
    }
}

/// Loaded configuration and the documents root, `--root` taking precedence.
fn settings(cli: &Cli) -> Result<(TrellisConfig, PathBuf)> {
    let config = TrellisConfig::load(cli.config.as_deref())?;
    let root = cli.root.clone().unwrap_or_else(|| config.root.clone());
    tracing::debug!(root = %root.display(), "Resolved documents root");
    Ok((config, root))
}

// ============================================================================
// Graph loading
// ============================================================================

/// Scans `root` and builds the graph.
///
/// Per-file failures do not abort the scan; they are logged and carried in
/// the graph's `errors`.
pub async fn load_graph(root: &Path, config: &TrellisConfig, include_mentions: bool) -> Result<BuildOutput> {
    let report = scan_directory(root, &config.scan).await?;
    for error in &report.errors {
        log::warn!("Skipped {error}");
    }
    log::info!(
        "Scanned {} documents under {} ({} errors)",
        report.documents.len(),
        root.display(),
        report.errors.len()
    );

    let built = GraphBuilder::new()
        .with_mentions(include_mentions)
        .with_errors(report.error_messages())
        .build(report.documents);
    Ok(built)
}

// ============================================================================
// Commands
// ============================================================================

/// `trellis graph`
pub fn graph_command(built: &BuildOutput, format: GraphFormat, edge_limit: usize) -> Result<CommandOutput> {
    let stdout = match format {
        GraphFormat::Json => with_newline(to_json(&built.graph)?),
        GraphFormat::Mermaid => to_mermaid(&built.graph, edge_limit),
    };
    Ok(CommandOutput::success(stdout))
}

/// `trellis impact`
pub fn impact_command(
    built: &BuildOutput,
    target: &str,
    options: &ImpactOptions,
    format: ReportFormat,
) -> Result<CommandOutput> {
    let report = analyze_impact(built, target, options)?;
    let stdout = match format {
        ReportFormat::Text => output::impact_text(&report),
        ReportFormat::Json => json(&report)?,
    };
    Ok(CommandOutput::success(stdout))
}

/// `trellis related`
///
/// In `paths` mode stdout carries nothing but paths, so warnings go to the
/// log instead.
pub fn related_command(
    built: &BuildOutput,
    target: &str,
    options: &ResolveOptions,
    format: RelatedFormat,
) -> Result<CommandOutput> {
    let result = resolve(built, target, options)?;
    let stdout = match format {
        RelatedFormat::Text => output::related_text(&result),
        RelatedFormat::Json => json(&result)?,
        RelatedFormat::Paths => {
            for warning in &result.warnings {
                log::warn!("{warning}");
            }
            output::related_paths(&result)
        }
    };
    Ok(CommandOutput::success(stdout))
}

/// `trellis describe`
pub fn describe_command(built: &BuildOutput, target: &str, format: ReportFormat) -> Result<CommandOutput> {
    let description = describe_node(built, target)?;
    let stdout = match format {
        ReportFormat::Text => output::describe_text(&description),
        ReportFormat::Json => json(&description)?,
    };
    Ok(CommandOutput::success(stdout))
}

/// `trellis lint`
///
/// With `strict`, any warning-severity finding yields exit code 2.
pub fn lint_command(built: &BuildOutput, strict: bool, format: ReportFormat) -> Result<CommandOutput> {
    let report = lint(&built.graph);
    let stdout = match format {
        ReportFormat::Text => output::lint_text(&report),
        ReportFormat::Json => json(&report)?,
    };
    let code = if strict && report.has_warnings() {
        LINT_FAILURE_CODE
    } else {
        0
    };
    Ok(CommandOutput { stdout, code })
}

fn json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(with_newline)
        .map_err(Error::from)
}

fn with_newline(mut text: String) -> String {
    text.push('\n');
    text
}

// ============================================================================
// Tests
// ============================================================================
