//! Build script for parkour-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path").value_name("PATH").help(help)
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("pk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find project roots and keep track of visited projects")
        .long_about(
            "Locate the root of the project containing a path and keep a registry of \
             visited projects ordered by how often they are used",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PARKOUR_DATA_DIR"),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Override the directory holding config.yaml")
                .value_name("PATH")
                .global(true)
                .env("PARKOUR_CONFIG_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("PARKOUR_BUSY_TIMEOUT"),
        )
        .subcommands(vec![
            Command::new("add")
                .about("Register the project containing a path")
                .long_about("Resolve the project root above PATH and register it with its kind")
                .arg(path_arg("Path inside the project"))
                .arg(
                    Arg::new("exact")
                        .long("exact")
                        .help("Register the path itself instead of searching for its root")
                        .action(clap::ArgAction::SetTrue),
                ),
            Command::new("remove")
                .about("Deregister a project")
                .arg(path_arg("Project path")),
            Command::new("list")
                .about("List registered projects, most visited first")
                .long_about("Display registered projects as a table, JSON, CSV or TSV"),
            Command::new("get")
                .about("Print a registered project and count the visit")
                .arg(path_arg("Project path")),
            Command::new("root")
                .about("Print the project root containing a path")
                .long_about(
                    "Print the registered project at PATH, else the nearest project root, \
                     else PATH itself",
                )
                .arg(path_arg("Starting path")),
            Command::new("update")
                .about("Change a field of a registered project")
                .long_about(
                    "Set kind, priority, build-command, run-command or test-command of a project",
                ),
            Command::new("blacklist")
                .about("Manage the blacklist")
                .subcommands(vec![
                    Command::new("add").about("Hide a path and refuse to register it"),
                    Command::new("remove").about("Allow a path again"),
                    Command::new("list").about("Show blacklisted paths"),
                ]),
            Command::new("search")
                .about("Find registered projects matching a term")
                .long_about("Match the term against project names, paths, kinds and priorities"),
            Command::new("prune")
                .about("Deregister projects whose directory no longer exists"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("pk.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
