// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 EnvError
//!                     |
//!   +------+------+---+---+------+------+------+
//!   |      |      |       |      |      |      |
//!   v      v      v       v      v      v      v
//! NotInit EnvNF Invalid Cancel  Io   Parse  ReadEnv
//!                Name          path   path   name
//!                              +io    +json  +io
//! ```
//!
//! Core operations return [`EnvResult`]; the command layer wraps them in
//! [`Result`] (anyhow) and adds context.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Errors raised by the registry, scanner and synchronizer.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The registry document does not exist yet.
    #[error("Config file not found. Run 'shopifyenv init' first.")]
    NotInitialized { path: PathBuf },

    /// Switch target is neither registered nor backed by a file.
    #[error("Environment '{name}' not found. No .env.{name} file exists.")]
    EnvironmentNotFound { name: String },

    /// Environment name cannot be mapped to a `.env.<name>` file.
    #[error("invalid environment name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Initialize declined to overwrite an existing registry.
    #[error("Operation cancelled: {} already exists", path.display())]
    Cancelled { path: PathBuf },

    /// Read or write failure on any file.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry document is not valid JSON for the expected structure.
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The environment file of a switch target could not be read.
    #[error("Failed to read environment file: {source}")]
    ReadEnvironment {
        name: String,
        #[source]
        source: Box<Self>,
    },
}

impl EnvError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true when the underlying cause is a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotInitialized { .. } | Self::EnvironmentNotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::ReadEnvironment { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
