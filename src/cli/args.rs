//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical tri-state field selection: tree toggling, select-all, and CSV template export
#[derive(Parser, Debug)]
#[command(name = "treeselect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Tree definition file (TOML)
    #[arg(short, long, global = true, env = "TREESELECT_TREE_FILE", value_hint = ValueHint::FilePath)]
    pub tree: Option<PathBuf>,

    /// Session state file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub state: Option<PathBuf>,

    /// Project directory holding a local .treeselect.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tree with tri-state checkboxes
    Show {
        /// Show all nodes regardless of expansion
        #[arg(short, long)]
        expand_all: bool,
        /// Show node ids
        #[arg(long)]
        ids: bool,
    },

    /// Toggle nodes (and their subtrees) in order
    Toggle {
        /// Node ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Select everything, or clear if everything is selected
    SelectAll,

    /// Toggle expansion of group nodes
    Expand {
        /// Node ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Expand every group
    ExpandAll,

    /// Collapse every group
    CollapseAll,

    /// Print the checkbox state of one node
    State {
        /// Node id
        id: String,
    },

    /// List selected fields in tree order
    Fields,

    /// Write a CSV template of the selected fields
    Export {
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Add a second row with field keys
        #[arg(short, long)]
        keys: bool,
        /// Cell delimiter (overrides config)
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Close the session, discarding the selection
    Reset,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}
