//! Get command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, path_or_current, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Print a registered project and count the visit.
#[derive(Args)]
pub struct GetCommand {
    /// Project path (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(&config)?;
        let path = path_or_current(self.path);

        let Some(project) = registry.get(&path)? else {
            return Err(CliError::SemanticFailure(format!(
                "Project not registered: {}",
                path.display()
            )));
        };

        println!("{}", project.path());
        if global.verbose {
            eprintln!(
                "kind: {}, priority: {}",
                project.kind().unwrap_or("-"),
                project.priority()
            );
        }
        Ok(())
    }
}
