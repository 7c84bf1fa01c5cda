//! Add command implementation.
//!
//! Registers the project root containing a path, recording the matched
//! indicator category as the project kind.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, resolve_start, resolver, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Register the project containing a path.
#[derive(Args)]
pub struct AddCommand {
    /// Path inside the project (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Register the path itself instead of searching for its root
    #[arg(long)]
    pub exact: bool,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let start = resolve_start(self.path.as_deref())?;

        let (target, kind) = if self.exact {
            (start, None)
        } else {
            let root = resolver(&config).resolve(&start)?;
            (root.path, Some(root.kind))
        };

        let mut registry = open_registry(&config)?;
        registry.add_with_kind(&target, kind.clone())?;

        println!("{target}");
        if !global.quiet {
            match kind {
                Some(kind) => eprintln!("Added {kind} project"),
                None => eprintln!("Added project"),
            }
        }
        Ok(())
    }
}
