// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `init` command.

use crate::cli::InitArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::registry::RegistryStore;
use crate::sync::{InitReport, Synchronizer};

/// Main handler for the init command.
///
/// # Errors
///
/// Returns an error if the directory cannot be scanned, the registry cannot
/// be written, or overwriting an existing registry is not allowed.
pub fn run_init_command(args: &InitArgs, settings: &Settings, store: &RegistryStore) -> Result<()> {
    let allow_overwrite = settings.init.overwrite && !args.keep_existing;
    let report = Synchronizer::new(store).initialize_with(|_| allow_overwrite)?;

    for line in format_init_report(&report) {
        println!("{line}");
    }
    println!("shopifyenv initialized successfully!");
    Ok(())
}

/// Human-readable summary of an init run.
#[must_use]
pub fn format_init_report(report: &InitReport) -> Vec<String> {
    let mut lines = Vec::new();

    let discovered: Vec<&str> = report.discovered().collect();
    if discovered.is_empty() {
        lines.push("No .env.* files found in the current directory.".to_string());
    } else {
        lines.push(format!("Found environments: {}", discovered.join(", ")));
    }

    lines.push(format!(
        "Created config file at {}",
        report.registry_path.display()
    ));

    if !report.keys.is_empty() {
        lines.push(format!(
            "Detected {} environment variables: {}",
            report.keys.len(),
            report.keys.join(", ")
        ));
    }

    lines
}
