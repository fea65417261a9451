//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rolesync - Reconcile serialized security roles into a live role store
#[derive(Parser, Debug)]
#[command(name = "rolesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize serialized roles into the role store
    Sync {
        /// Directory of serialized role files (*.toml)
        #[arg(short, long)]
        source: PathBuf,

        /// Role store file to reconcile into
        #[arg(long)]
        store: PathBuf,

        /// Sync settings file (include rules, orphan policy)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the role store has drifted from the serialized roles
    Check {
        /// Directory of serialized role files (*.toml)
        #[arg(short, long)]
        source: PathBuf,

        /// Role store file to check against
        #[arg(long)]
        store: PathBuf,

        /// Sync settings file (include rules, orphan policy)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output the drift report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the roles in the role store with their parents
    List {
        /// Role store file to read
        #[arg(long)]
        store: PathBuf,
    },
}
