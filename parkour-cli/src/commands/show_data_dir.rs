//! Command to show the resolved data directory path.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// Show the resolved data directory path.
#[derive(Args)]
pub struct ShowDataDirCommand {}

impl ShowDataDirCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = config
            .database_config()
            .map_err(|e| CliError::Config(e.to_string()))?;

        match db.path.parent() {
            Some(dir) => println!("{}", dir.display()),
            None => println!("{}", db.path.display()),
        }
        Ok(())
    }
}
