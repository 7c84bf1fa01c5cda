//! List command implementation.
//!
//! This module implements the `list` command, which displays registered
//! projects in various formats (table, JSON, CSV, TSV). The formatters are
//! shared with `search`.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_registry, shorten_path, GlobalOptions};
use clap::{Args, ValueEnum};
use parkour::config::{Config, OutputFormat as ConfiguredFormat};
use parkour::Project;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = [
    "priority",
    "name",
    "path",
    "kind",
    "added_at",
    "last_visited_at",
];

/// List registered projects, most visited first.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured format, then table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

/// Output format for project listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<ConfiguredFormat> for OutputFormat {
    fn from(format: ConfiguredFormat) -> Self {
        match format {
            ConfiguredFormat::Table => Self::Table,
            ConfiguredFormat::Json => Self::Json,
            ConfiguredFormat::Csv => Self::Csv,
            ConfiguredFormat::Tsv => Self::Tsv,
        }
    }
}

impl OutputFormat {
    /// The flag value if given, else the configured format, else table.
    pub fn choose(flag: Option<Self>, config: &Config) -> Self {
        flag.or_else(|| config.output_format.map(Self::from))
            .unwrap_or(Self::Table)
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let registry = open_registry(&config)?;
        let projects = registry.list()?;

        print_projects(
            &projects,
            OutputFormat::choose(self.format, &config),
            self.show_full_paths,
        )
    }
}

/// Write `projects` to stdout in `format`.
pub fn print_projects(
    projects: &[Project],
    format: OutputFormat,
    show_full: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => format_as_table(projects, show_full),
        OutputFormat::Json => format_as_json(projects),
        OutputFormat::Csv => format_as_delimited(projects, b','),
        OutputFormat::Tsv => format_as_delimited(projects, b'\t'),
    }
}

fn visited(project: &Project) -> String {
    project
        .last_visited_at()
        .map(format_timestamp)
        .unwrap_or_default()
}

/// Format projects as a human-readable table.
fn format_as_table(projects: &[Project], show_full: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for project in projects {
        let path_str = if show_full {
            project.path().to_string()
        } else {
            shorten_path(project.path().as_path())
        };
        let last = visited(project);

        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            project.priority(),
            project.name(),
            path_str,
            project.kind().unwrap_or("-"),
            format_timestamp(project.added_at()),
            if last.is_empty() { "-" } else { last.as_str() },
        )?;
    }

    Ok(())
}

/// Format projects as JSON.
fn format_as_json(projects: &[Project]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = projects
        .iter()
        .map(|p| {
            serde_json::json!({
                "priority": p.priority(),
                "name": p.name(),
                "path": p.path().to_string(),
                "kind": p.kind(),
                "build_command": p.build_command(),
                "run_command": p.run_command(),
                "test_command": p.test_command(),
                "added_at": format_timestamp(p.added_at()),
                "last_visited_at": p.last_visited_at().map(format_timestamp),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format projects as delimited output (CSV or TSV).
fn format_as_delimited(projects: &[Project], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for project in projects {
        writer
            .write_record(&[
                project.priority().to_string(),
                project.name(),
                project.path().to_string(),
                project.kind().unwrap_or("").to_string(),
                format_timestamp(project.added_at()),
                visited(project),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_prefers_flag() {
        let config = Config {
            output_format: Some(ConfiguredFormat::Csv),
            ..Default::default()
        };
        assert_eq!(
            OutputFormat::choose(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
        assert_eq!(OutputFormat::choose(None, &config), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::choose(None, &Config::default()),
            OutputFormat::Table
        );
    }
}
