//! Search command implementation.

use crate::commands::list::{print_projects, OutputFormat};
use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Args;

/// Find registered projects matching a term.
///
/// A project matches when its name, path, kind or priority contains the term.
#[derive(Args)]
pub struct SearchCommand {
    /// Text to look for
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Output format (defaults to the configured format, then table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let registry = open_registry(&config)?;
        let matches = registry.search(&self.term)?;

        if matches.is_empty() && !global.quiet {
            eprintln!("No projects match '{}'", self.term);
        }
        print_projects(
            &matches,
            OutputFormat::choose(self.format, &config),
            self.show_full_paths,
        )
    }
}
