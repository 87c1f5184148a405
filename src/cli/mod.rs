// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! shopifyenv [global options] <command>
//! init [--keep-existing]
//! use <env_name>
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};

/// CLI tool to manage environment variables for Shopify extensions
#[derive(Debug, Parser)]
#[command(
    name = "shopifyenv",
    author,
    version,
    about = "CLI tool to manage environment variables for Shopify extensions",
    long_about = "CLI tool to manage environment variables for Shopify extensions.\n\n\
                  `shopifyenv init` scans the project directory for .env.<name> files\n\
                  and records them in shopifyenv.json. `shopifyenv use <name>` marks\n\
                  an environment as active and merges its keys into the registry.",
    after_help = "SETTINGS:\n\n\
                  Settings are read from shopifyenv.toml in the project directory if\n\
                  it exists, then from --config, then from --set overrides such as\n\
                  `--set init.overwrite=false`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize shopifyenv configuration file.
    Init(InitArgs),

    /// Use the specified environment.
    Use(UseArgs),

    /// Shows the version.
    Version,
}

/// Arguments for `init`.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Abort instead of overwriting an existing shopifyenv.json.
    #[arg(long = "keep-existing")]
    pub keep_existing: bool,
}

/// Arguments for `use`.
#[derive(Debug, Clone, Args)]
pub struct UseArgs {
    /// Environment name; selects the file .env.<ENV_NAME>.
    #[arg(value_name = "ENV_NAME")]
    pub env_name: String,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
