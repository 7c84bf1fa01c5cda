//! Prune command implementation.
//!
//! This module implements the `prune` command, which deregisters projects
//! whose directory no longer exists.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Args;

/// Deregister projects whose directory no longer exists.
#[derive(Args)]
pub struct PruneCommand {
    /// Perform a dry run (show what would be removed without removing)
    #[arg(long)]
    pub dry_run: bool,
}

impl PruneCommand {
    /// Execute the prune command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(&config)?;

        let removed = if self.dry_run {
            registry.missing()?
        } else {
            registry.prune()?
        };

        for path in &removed {
            println!("{}", path.display());
        }
        if !global.quiet {
            let prefix = if self.dry_run { "[DRY RUN] Would remove" } else { "Removed" };
            eprintln!("{prefix} {} project(s) with missing directories", removed.len());
        }
        Ok(())
    }
}
