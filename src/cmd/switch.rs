// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `use` command.

use crate::cli::UseArgs;
use crate::error::Result;
use crate::registry::RegistryStore;
use crate::sync::{SwitchReport, Synchronizer};

/// Main handler for the use command.
///
/// # Errors
///
/// Returns an error if the registry is missing, the environment is unknown,
/// or its file cannot be read.
pub fn run_use_command(args: &UseArgs, store: &RegistryStore) -> Result<()> {
    let report = Synchronizer::new(store).switch(&args.env_name)?;

    for line in format_switch_report(&report) {
        println!("{line}");
    }
    println!("Now using environment: {}", report.name);
    Ok(())
}

/// Human-readable summary of a switch.
#[must_use]
pub fn format_switch_report(report: &SwitchReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.new_keys.len() + 2);

    if report.newly_registered {
        lines.push(format!("Added new environment '{}' to config.", report.name));
    }
    lines.extend(
        report
            .new_keys
            .iter()
            .map(|key| format!("Added new key: {key}")),
    );
    lines.push(format!(
        "Environment values from {} are now active.",
        report.env_path.display()
    ));

    lines
}
