// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconciles environment files with the registry.
//!
//! ```text
//! initialize                          switch(name)
//!   exists? --> confirm overwrite       exists? --no--> NotInitialized
//!   discover_environments               load
//!   per file: Loaded | Skipped          unregistered? file? --no--> EnvironmentNotFound
//!   keys = union (first seen)           parse .env.<name> --err--> ReadEnvironment
//!   save fresh document                 currentEnv, lastUsed = now
//!                                       append new keys, save
//! ```
//!
//! Nothing is written unless the whole operation succeeds, except that
//! `initialize` tolerates unreadable files by skipping them.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{EnvError, EnvResult};
use crate::registry::{RegistryDocument, RegistryStore, env_file_name};
use crate::scanner::{discover_environments, parse_environment_file};

/// Source of `lastUsed` timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Runs `init` and `use` against one [`RegistryStore`].
#[derive(Debug, Clone)]
pub struct Synchronizer<'a> {
    store: &'a RegistryStore,
    clock: Clock,
}

impl<'a> Synchronizer<'a> {
    #[must_use]
    pub fn new(store: &'a RegistryStore) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock, mainly for tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &RegistryStore {
        self.store
    }

    /// Builds a fresh registry from the environment files in the project
    /// directory, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or the registry
    /// cannot be written.
    pub fn initialize(&self) -> EnvResult<InitReport> {
        self.initialize_with(|_| true)
    }

    /// Like [`initialize`](Self::initialize), but asks `confirm_overwrite`
    /// before replacing an existing registry.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Cancelled`] if the overwrite is declined, otherwise
    /// the same errors as [`initialize`](Self::initialize).
    pub fn initialize_with<F>(&self, confirm_overwrite: F) -> EnvResult<InitReport>
    where
        F: FnOnce(&Path) -> bool,
    {
        let registry_path = self.store.path().to_path_buf();
        let replaced_existing = self.store.exists();
        if replaced_existing {
            warn!("Config file already exists at {}", registry_path.display());
            if !confirm_overwrite(&registry_path) {
                return Err(EnvError::Cancelled {
                    path: registry_path,
                });
            }
        }

        let directory = self.store.directory();
        let outcomes: Vec<ScanOutcome> = discover_environments(directory)?
            .map(|name| scan_one(directory, name))
            .collect();

        let mut document = RegistryDocument::default();
        for outcome in &outcomes {
            if let ScanOutcome::Loaded { name, keys } = outcome {
                document.register(name);
                document.merge_keys(keys.iter().cloned());
            }
        }

        self.store.save(&document)?;
        info!(
            environments = document.environments.len(),
            keys = document.keys.len(),
            "initialized registry"
        );

        Ok(InitReport {
            registry_path,
            replaced_existing,
            outcomes,
            keys: document.keys.into_iter().collect(),
        })
    }

    /// Makes `name` the active environment, registering it on first use and
    /// merging its keys into the registry.
    ///
    /// # Errors
    ///
    /// - [`EnvError::NotInitialized`] if there is no registry.
    /// - [`EnvError::InvalidName`] if `name` cannot name a `.env.<name>` file.
    /// - [`EnvError::EnvironmentNotFound`] if `name` is unregistered and has no file.
    /// - [`EnvError::ReadEnvironment`] if the environment file cannot be read.
    /// - [`EnvError::Io`] / [`EnvError::Parse`] from loading or saving the registry.
    pub fn switch(&self, name: &str) -> EnvResult<SwitchReport> {
        if !self.store.exists() {
            return Err(EnvError::NotInitialized {
                path: self.store.path().to_path_buf(),
            });
        }
        validate_environment_name(name)?;

        let mut document = self.store.load()?;
        if let Some((previous, record)) = document.current() {
            debug!(from = previous, last_used = ?record.last_used, to = name, "switching environment");
        }
        let env_path = self.store.directory().join(env_file_name(name));

        let newly_registered = !document.environments.contains_key(name);
        if newly_registered && !env_path.exists() {
            return Err(EnvError::EnvironmentNotFound {
                name: name.to_string(),
            });
        }

        let vars = parse_environment_file(&env_path).map_err(|e| EnvError::ReadEnvironment {
            name: name.to_string(),
            source: Box::new(e),
        })?;

        if newly_registered {
            document.register(name);
            debug!(env = name, "registered new environment");
        }
        document.activate(name, (self.clock)());
        let new_keys = document.merge_keys(vars.into_keys());

        self.store.save(&document)?;
        info!(env = name, new_keys = new_keys.len(), "switched environment");

        Ok(SwitchReport {
            name: name.to_string(),
            env_path,
            newly_registered,
            new_keys,
        })
    }
}

fn scan_one(directory: &Path, name: String) -> ScanOutcome {
    let path = directory.join(env_file_name(&name));
    match parse_environment_file(&path) {
        Ok(vars) => ScanOutcome::Loaded {
            name,
            keys: vars.into_keys().collect(),
        },
        Err(error) => {
            if error.is_not_found() {
                debug!("{} disappeared while scanning", path.display());
            } else {
                warn!("Could not read {}: {error}", path.display());
            }
            ScanOutcome::Skipped { name, path, error }
        }
    }
}

/// Rejects names that cannot map to a file in the project directory.
///
/// # Errors
///
/// Returns [`EnvError::InvalidName`] for empty names, `.`/`..`, and names
/// containing a path separator of the host platform.
pub fn validate_environment_name(name: &str) -> EnvResult<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name is a relative path component"
    } else if name.contains(std::path::is_separator) {
        "name contains a path separator"
    } else {
        return Ok(());
    };
    Err(EnvError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Result of scanning one discovered environment file during `init`.
#[derive(Debug)]
pub enum ScanOutcome {
    /// File was read; its keys in file order.
    Loaded { name: String, keys: Vec<String> },
    /// File could not be read and was left out of the registry.
    Skipped {
        name: String,
        path: PathBuf,
        error: EnvError,
    },
}

impl ScanOutcome {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Loaded { name, .. } | Self::Skipped { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Summary of an `init` run.
#[derive(Debug)]
pub struct InitReport {
    pub registry_path: PathBuf,
    /// A registry existed before and was replaced.
    pub replaced_existing: bool,
    /// One entry per discovered environment, in scan order.
    pub outcomes: Vec<ScanOutcome>,
    /// Key union written to the registry.
    pub keys: Vec<String>,
}

impl InitReport {
    /// Every environment name found in the directory.
    pub fn discovered(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(ScanOutcome::name)
    }

    /// Environments written to the registry.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_loaded())
            .map(ScanOutcome::name)
    }

    /// Environments left out because their file could not be read.
    pub fn skipped(&self) -> impl Iterator<Item = &ScanOutcome> {
        self.outcomes.iter().filter(|o| !o.is_loaded())
    }
}

/// Summary of a `use` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    /// Environment that is now active.
    pub name: String,
    /// File the environment was read from.
    pub env_path: PathBuf,
    /// The environment was not in the registry before this switch.
    pub newly_registered: bool,
    /// Keys added to the registry, in file order.
    pub new_keys: Vec<String>,
}
