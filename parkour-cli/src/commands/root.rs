//! Root command implementation.
//!
//! Locates the project for a path: a registered project is reported as-is,
//! otherwise the nearest root is resolved, and when there is none the
//! canonical path itself is printed.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, resolve_start, resolver, GlobalOptions};
use clap::Args;
use parkour::ResolveError;
use std::path::PathBuf;

/// Print the project root containing a path.
#[derive(Args)]
pub struct RootCommand {
    /// Starting path (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Fail instead of printing the path itself when no root is found
    #[arg(long)]
    pub strict: bool,
}

impl RootCommand {
    /// Execute the root command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let start = resolve_start(self.path.as_deref())?;

        let registry = open_registry(&config)?;
        if registry.contains(&start)? {
            log::debug!("{start} is a registered project");
            println!("{start}");
            return Ok(());
        }

        match resolver(&config).resolve(&start) {
            Ok(root) => {
                if global.verbose {
                    eprintln!("{} ({})", root.kind, root.tier);
                }
                println!("{}", root.path);
            }
            Err(ResolveError::NoProjectRoot { .. }) if !self.strict => {
                if !global.quiet {
                    eprintln!("No project root found; using {start}");
                }
                println!("{start}");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
