//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::domain::OrphanPolicy;

/// Build trees and forests from flat parent-referencing department tables
#[derive(Parser, Debug)]
#[command(name = "treeize")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Settings file (default: $XDG_CONFIG_HOME/treeize/treeize.toml)
    #[arg(short, long, global = true, env = "TREEIZE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Input and construction flags shared by the data commands.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// TOML file with [[department]] tables
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Build a forest instead of a single-rooted tree
    #[arg(long)]
    pub forest: bool,

    /// Orphan policy: discard, top or reject
    #[arg(long, value_name = "POLICY")]
    pub orphans: Option<OrphanPolicy>,

    /// Order siblings by their `order` field
    #[arg(long)]
    pub sorted: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the hierarchy as indented lines
    Print {
        #[command(flatten)]
        build: BuildArgs,
        /// Indent repeated per layer
        #[arg(long)]
        prefix: Option<String>,
        /// Replaces the first indent repetition
        #[arg(long)]
        first_prefix: Option<String>,
    },

    /// Show the hierarchy as a box-drawing tree
    Tree {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// List the path of every node in depth-first order
    Flat {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Find a node by id and show its path and layer
    Find {
        #[command(flatten)]
        build: BuildArgs,
        /// Department id
        id: String,
    },

    /// Show construction-time and live node counts
    Size {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Show effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
