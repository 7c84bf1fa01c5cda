//! Remove command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, path_or_current, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Deregister a project.
#[derive(Args)]
pub struct RemoveCommand {
    /// Project path (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl RemoveCommand {
    /// Execute the remove command.
    ///
    /// Removing a path that is not registered succeeds with a notice.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(&config)?;
        let path = path_or_current(self.path);

        let removed = registry.remove(&path)?;
        if !global.quiet {
            if removed {
                eprintln!("Removed {}", path.display());
            } else {
                eprintln!("Not registered: {}", path.display());
            }
        }
        Ok(())
    }
}
