// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool settings.
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. shopifyenv.toml (project directory, optional)
//! 3. --config FILE
//! 4. --set KEY=VALUE
//! 5. CLI flags (--log-level, --log-file)
//! ```
//!
//! # Example
//!
//! ```toml
//! [registry]
//! file = "shopifyenv.json"
//!
//! [init]
//! overwrite = false
//!
//! [log]
//! level = 3
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::registry::DEFAULT_REGISTRY_FILE;

use loader::SettingsLoader;

/// Name of the optional per-project settings file.
pub const SETTINGS_FILE: &str = "shopifyenv.toml";

/// Complete tool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub registry: RegistrySettings,
    pub init: InitSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Create a new settings builder.
    #[must_use]
    pub fn builder() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Settings` structure.
    pub fn parse(content: &str) -> crate::error::Result<Self> {
        Self::builder().add_toml_str(content).build()
    }
}

/// Where the registry document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Registry file name, relative to the project directory.
    pub file: PathBuf,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_REGISTRY_FILE),
        }
    }
}

/// Behavior of `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitSettings {
    /// Replace an existing registry without asking.
    pub overwrite: bool,
}

impl Default for InitSettings {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Logging verbosity and optional log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Console level (0-5).
    pub level: LogLevel,
    /// File level (0-5), used only when `file` is set.
    pub file_level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::WARN,
            file_level: LogLevel::TRACE,
            file: None,
        }
    }
}
