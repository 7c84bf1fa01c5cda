//! Update command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Change a field of a registered project.
#[derive(Args)]
pub struct UpdateCommand {
    /// Project path
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Field to change (kind, priority, build-command, run-command, test-command)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// New value; commands are split on whitespace, an empty kind clears it
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(&config)?;

        let project = registry.update_field(&self.path, &self.field, &self.value)?;
        if !global.quiet {
            eprintln!("Updated {} of {}", self.field, project.path());
        }
        Ok(())
    }
}
