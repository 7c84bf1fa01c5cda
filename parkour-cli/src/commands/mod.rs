//! CLI command implementations.
//!
//! - `add`: Register the project containing a path
//! - `remove`: Deregister a project
//! - `list`: List registered projects
//! - `get`: Print a registered project and count the visit
//! - `root`: Print the project root containing a path
//! - `update`: Change a project field
//! - `blacklist`: Manage the blacklist
//! - `search`: Find projects matching a term
//! - `prune`: Deregister projects whose directory is gone
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod add;
pub mod blacklist;
pub mod completions;
pub mod get;
pub mod list;
pub mod prune;
pub mod remove;
pub mod root;
pub mod search;
pub mod show_data_dir;
pub mod update;

pub use add::AddCommand;
pub use blacklist::BlacklistCommand;
pub use completions::CompletionsCommand;
pub use get::GetCommand;
pub use list::ListCommand;
pub use prune::PruneCommand;
pub use remove::RemoveCommand;
pub use root::RootCommand;
pub use search::SearchCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use update::UpdateCommand;
