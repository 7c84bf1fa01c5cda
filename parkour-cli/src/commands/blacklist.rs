//! Blacklist command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, path_or_current, GlobalOptions};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Manage the blacklist.
#[derive(Args)]
pub struct BlacklistCommand {
    #[command(subcommand)]
    pub action: BlacklistAction,
}

/// Blacklist operations.
#[derive(Subcommand)]
pub enum BlacklistAction {
    /// Hide a path from listings and refuse to register it
    Add {
        /// Path to blacklist (defaults to the current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Allow a path again
    Remove {
        /// Path to allow (defaults to the current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Show blacklisted paths
    List,
}

impl BlacklistCommand {
    /// Execute the blacklist command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(&config)?;

        match self.action {
            BlacklistAction::Add { path } => {
                let path = path_or_current(path);
                registry.set_blacklisted(&path, true)?;
                if !global.quiet {
                    eprintln!("Blacklisted {}", path.display());
                }
            }
            BlacklistAction::Remove { path } => {
                let path = path_or_current(path);
                registry.set_blacklisted(&path, false)?;
                if !global.quiet {
                    eprintln!("Removed {} from the blacklist", path.display());
                }
            }
            BlacklistAction::List => {
                for path in registry.list_blacklist()? {
                    println!("{}", path.display());
                }
            }
        }
        Ok(())
    }
}
