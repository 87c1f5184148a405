// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! -C DIR            ← project directory (default: cwd)
//! --config FILE     ← additional settings file
//! --set KEY=VAL     ← direct settings override (can repeat)
//! --log-level N     ← console verbosity (0-5)
//! --log-file FILE   ← also log to FILE
//!
//! Precedence: CLI flags > --set > --config > shopifyenv.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Project directory containing .env.* files and shopifyenv.json.
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Path to an additional TOML settings file.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Sets an option, such as 'init.overwrite=false'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append, global = true)]
    pub options: Vec<String>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Project directory, falling back to the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory was given and the current directory
    /// cannot be determined.
    pub fn project_dir(&self) -> std::io::Result<PathBuf> {
        self.directory
            .clone()
            .map_or_else(std::env::current_dir, Ok)
    }

    /// Converts command-line flags to settings overrides.
    #[must_use]
    pub fn to_settings_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("log.level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("log.file={}", path.display()));
        }

        overrides
    }
}
