//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddCommand, BlacklistCommand, CompletionsCommand, GetCommand, ListCommand, PruneCommand,
    RemoveCommand, RootCommand, SearchCommand, ShowDataDirCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for jumping between project roots.
#[derive(Parser)]
#[command(name = "pk")]
#[command(version, about = "Find project roots and keep track of visited projects", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PARKOUR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the directory holding config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "PARKOUR_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PARKOUR_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Register the project containing a path
    #[command(visible_alias = "a")]
    Add(AddCommand),

    /// Deregister a project
    #[command(visible_alias = "r")]
    Remove(RemoveCommand),

    /// List registered projects, most visited first
    #[command(visible_alias = "l")]
    List(ListCommand),

    /// Print a registered project and count the visit
    Get(GetCommand),

    /// Print the project root containing a path
    Root(RootCommand),

    /// Change a field of a registered project
    #[command(visible_alias = "u")]
    Update(UpdateCommand),

    /// Manage the blacklist
    #[command(visible_alias = "b")]
    Blacklist(BlacklistCommand),

    /// Find registered projects matching a term
    #[command(visible_alias = "s")]
    Search(SearchCommand),

    /// Deregister projects whose directory no longer exists
    Prune(PruneCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
