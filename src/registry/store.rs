// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::RegistryDocument;
use crate::error::{EnvError, EnvResult};

/// Durable home of the [`RegistryDocument`] for one project directory.
///
/// `load` and `save` are the only points where registry state changes hands.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    directory: PathBuf,
    path: PathBuf,
}

impl RegistryStore {
    /// Store for `file_name` inside `directory`.
    pub fn new(directory: impl Into<PathBuf>, file_name: impl AsRef<Path>) -> Self {
        let directory = directory.into();
        let path = directory.join(file_name);
        Self { directory, path }
    }

    /// Project directory the registry belongs to.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of the registry file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and decode the registry.
    ///
    /// # Errors
    ///
    /// - [`EnvError::NotInitialized`] if the file does not exist.
    /// - [`EnvError::Io`] if it cannot be read.
    /// - [`EnvError::Parse`] if it is not a valid registry document.
    pub fn load(&self) -> EnvResult<RegistryDocument> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                EnvError::NotInitialized {
                    path: self.path.clone(),
                }
            } else {
                EnvError::io(&self.path, source)
            }
        })?;

        let document = serde_json::from_str(&content).map_err(|source| EnvError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loaded registry");
        Ok(document)
    }

    /// Overwrite the registry with `document` as 2-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Io`] if the file cannot be written.
    pub fn save(&self, document: &RegistryDocument) -> EnvResult<()> {
        let rendered = render(document).map_err(|source| EnvError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let mut file =
            std::fs::File::create(&self.path).map_err(|e| EnvError::io(&self.path, e))?;
        file.write_all(&rendered)
            .and_then(|()| file.flush())
            .map_err(|e| EnvError::io(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            environments = document.environments.len(),
            keys = document.keys.len(),
            "saved registry"
        );
        Ok(())
    }
}

/// Pretty JSON with a trailing newline.
pub(crate) fn render(document: &RegistryDocument) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"  "));
    document.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}
