//! Command-line argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trellis_graph::{Direction, Relation};

/// Trellis - document relationship graph and impact analysis
#[derive(Parser, Debug)]
#[command(name = "trellis", version)]
#[command(about = "Document relationship graph and impact analysis", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TRELLIS_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Documents root (overrides `root` in the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the document graph and print it
    Graph {
        #[arg(long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,

        /// Maximum edges drawn in Mermaid output
        #[arg(long)]
        edge_limit: Option<usize>,

        /// Do not derive edges from body-text mentions
        #[arg(long)]
        no_mentions: bool,
    },

    /// Show what needs review if a document changes
    Impact {
        /// Document id or path
        target: String,

        #[arg(long)]
        max_depth: Option<usize>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// List documents related to a document
    Related {
        /// Document id or path
        target: String,

        /// Hops to follow
        #[arg(long, conflicts_with = "all")]
        depth: Option<usize>,

        /// Follow relations without a hop bound
        #[arg(long)]
        all: bool,

        #[arg(long, value_enum, default_value_t = DirectionArg::Both)]
        direction: DirectionArg,

        /// Relation to follow (repeatable; default: all)
        #[arg(long = "relation", value_enum)]
        relations: Vec<RelationArg>,

        /// Maximum results (at most 100)
        #[arg(long)]
        limit: Option<usize>,

        /// Accepted but not implemented
        #[arg(long)]
        priority_filter: bool,

        #[arg(long, value_enum, default_value_t = RelatedFormat::Text)]
        format: RelatedFormat,
    },

    /// Show one document and its edges
    Describe {
        /// Document id or path
        target: String,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Report structural problems in the document set
    Lint {
        /// Exit with status 2 when any warning is found
        #[arg(long)]
        strict: bool,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Get a value by dotted key (e.g. `scan.concurrency`)
    Get { key: String },
    /// Set a value by dotted key in the config file
    Set { key: String, value: String },
    /// Write a default config file
    Init {
        /// Where to write (default: the resolved config path)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    Json,
    Mermaid,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelatedFormat {
    Text,
    Json,
    Paths,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionArg {
    Upstream,
    Downstream,
    Both,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Upstream => Direction::Upstream,
            DirectionArg::Downstream => Direction::Downstream,
            DirectionArg::Both => Direction::Both,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationArg {
    Parent,
    Related,
    Mentions,
}

impl From<RelationArg> for Relation {
    fn from(arg: RelationArg) -> Self {
        match arg {
            RelationArg::Parent => Relation::Parent,
            RelationArg::Related => Relation::Related,
            RelationArg::Mentions => Relation::Mentions,
        }
    }
}
