// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Logging --> Command Dispatch
//!   Init | Use | Version
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::CommandFactory;
use tracing::debug;

use shopifyenv::cli::global::GlobalOptions;
use shopifyenv::cli::{self, Cli, Command};
use shopifyenv::cmd::init::run_init_command;
use shopifyenv::cmd::switch::run_use_command;
use shopifyenv::config::loader::SettingsLoader;
use shopifyenv::config::{SETTINGS_FILE, Settings};
use shopifyenv::logging::{LogConfig, init_logging};
use shopifyenv::registry::RegistryStore;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = &cli.command else {
        return print_help();
    };
    if matches!(command, Command::Version) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let project_dir = match cli.global.project_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to determine project directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (settings, settings_files) = match load_settings(&cli.global, &project_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load settings: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&settings)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    for (kind, path) in &settings_files {
        debug!(kind = %kind, path = %path.display(), "loaded settings file");
    }

    let store = RegistryStore::new(project_dir, &settings.registry.file);
    dispatch_command(command, &settings, &store)
}

fn print_help() -> ExitCode {
    let mut command = Cli::command();
    if let Err(e) = command.print_help() {
        eprintln!("Failed to print help: {e}");
        return ExitCode::FAILURE;
    }
    println!();
    ExitCode::SUCCESS
}

fn dispatch_command(command: &Command, settings: &Settings, store: &RegistryStore) -> ExitCode {
    let result = match command {
        Command::Init(args) => run_init_command(args, settings, store)
            .map_err(|e| format!("Error initializing shopifyenv: {e}")),
        Command::Use(args) => run_use_command(args, store)
            .map_err(|e| format!("Error using environment {}: {e}", args.env_name)),
        Command::Version => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Settings plus the files they were read from.
type LoadedSettings = (Settings, Vec<(String, PathBuf)>);

fn load_settings(global: &GlobalOptions, project_dir: &Path) -> shopifyenv::error::Result<LoadedSettings> {
    let mut loader = SettingsLoader::new().add_toml_file_optional(project_dir.join(SETTINGS_FILE));
    if let Some(ref path) = global.config {
        loader = loader.add_toml_file(path);
    }
    for option in global.to_settings_overrides() {
        loader = loader.set_option(&option)?;
    }
    let files = loader.loaded_files().to_vec();
    Ok((loader.build()?, files))
}

fn build_log_config(settings: &Settings) -> LogConfig {
    LogConfig::builder()
        .with_console_level(settings.log.level)
        .with_file_level(settings.log.file_level)
        .maybe_with_log_file(settings.log.file.as_ref().map(|p| p.display().to_string()))
        .build()
}
