// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry document and its JSON store.
//!
//! ```text
//! shopifyenv.json
//! {
//!   "currentEnv": "dev" | null,
//!   "environments": { "<name>": { "path": ".env.<name>", "lastUsed": ISO | null } },
//!   "keys": [ "A", "B", ... ]          (first-seen order, never shrinks)
//! }
//! ```

pub mod store;


use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

pub use store::RegistryStore;

/// Prefix shared by every environment file.
pub const ENV_FILE_PREFIX: &str = ".env.";

/// Default registry file name, relative to the project directory.
pub const DEFAULT_REGISTRY_FILE: &str = "shopifyenv.json";

/// Relative path of the file backing environment `name`.
#[must_use]
pub fn env_file_name(name: &str) -> String {
    format!("{ENV_FILE_PREFIX}{name}")
}

/// Persisted record of known environments, the active one, and all keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDocument {
    /// Active environment, if any.
    #[serde(default)]
    pub current_env: Option<String>,
    /// Environment name -> record, in registration order.
    #[serde(default)]
    pub environments: IndexMap<String, EnvironmentRecord>,
    /// Union of every variable key ever observed.
    #[serde(default)]
    pub keys: IndexSet<String>,
    /// Fields this tool does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RegistryDocument {
    /// Registers `name` with a fresh record unless already present.
    ///
    /// Returns true if the environment was newly added.
    pub fn register(&mut self, name: &str) -> bool {
        if self.environments.contains_key(name) {
            return false;
        }
        self.environments
            .insert(name.to_string(), EnvironmentRecord::for_name(name));
        true
    }

    /// Appends keys not yet known, returning the newly added ones in order.
    pub fn merge_keys<I, S>(&mut self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter()
            .map(Into::into)
            .filter(|key| self.keys.insert(key.clone()))
            .collect()
    }

    /// Marks `name` as active and stamps its `lastUsed`.
    ///
    /// Returns false (and changes nothing) if `name` is not registered.
    pub fn activate(&mut self, name: &str, now: DateTime<Utc>) -> bool {
        let Some(record) = self.environments.get_mut(name) else {
            return false;
        };
        record.last_used = Some(now);
        self.current_env = Some(name.to_string());
        true
    }

    /// The record of the active environment.
    #[must_use]
    pub fn current(&self) -> Option<(&str, &EnvironmentRecord)> {
        let name = self.current_env.as_deref()?;
        self.environments.get(name).map(|record| (name, record))
    }
}

/// Metadata for one `.env.<name>` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRecord {
    /// Relative path of the backing file.
    pub path: String,
    /// When the environment was last switched to.
    #[serde(default, with = "iso_millis")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EnvironmentRecord {
    /// A never-used record backed by `.env.<name>`.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        Self {
            path: env_file_name(name),
            last_used: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// `lastUsed` as `2026-01-02T03:04:05.678Z`.
///
/// Any RFC 3339 string is accepted on read. Anything else reads as unset and
/// is replaced the next time the environment is used.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use tracing::debug;

    pub(super) fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(e) => {
                    debug!(value = %raw, "ignoring unreadable lastUsed: {e}");
                    None
                }
            },
            other => {
                debug!(value = %other, "ignoring non-string lastUsed");
                None
            }
        };
        Ok(parsed)
    }
}
