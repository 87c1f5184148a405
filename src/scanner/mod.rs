// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment file discovery and parsing.
//!
//! ```text
//! discover_environments(dir)      read_dir --> ".env.<name>" --> name
//!                                 (lazy, restartable by calling again)
//! parse_environment_file(path)    read (lossy UTF-8) --> lines --> EnvVars
//!                                 KEY=value per line, dotenvy decodes values,
//!                                 malformed lines skipped
//! ```


use std::fs::ReadDir;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{EnvError, EnvResult};
use crate::registry::ENV_FILE_PREFIX;

/// Parsed key/value pairs of one environment file, in first-seen key order.
pub type EnvVars = IndexMap<String, String>;

/// Lazily lists the environment names found in `directory`.
///
/// # Errors
///
/// Returns [`EnvError::Io`] if the directory cannot be listed.
pub fn discover_environments(directory: &Path) -> EnvResult<Environments> {
    let entries = std::fs::read_dir(directory).map_err(|e| EnvError::io(directory, e))?;
    Ok(Environments { entries })
}

/// Iterator returned by [`discover_environments`].
#[derive(Debug)]
pub struct Environments {
    entries: ReadDir,
}

impl Iterator for Environments {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                debug!(name = ?entry.file_name(), "skipping non UTF-8 entry");
                continue;
            };
            if let Some(name) = environment_name(file_name) {
                return Some(name.to_string());
            }
        }
        None
    }
}

/// Environment name encoded in `file_name`, if it follows `.env.<name>`.
///
/// A bare `.env.` has no name and is ignored.
#[must_use]
pub fn environment_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(ENV_FILE_PREFIX)
        .filter(|name| !name.is_empty())
}

/// Reads `path` and decodes its dotenv content.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`EnvError::Io`] if the file cannot be read. Parsing itself never
/// fails: lines that are not valid assignments are skipped.
pub fn parse_environment_file(path: &Path) -> EnvResult<EnvVars> {
    let bytes = std::fs::read(path).map_err(|e| EnvError::io(path, e))?;
    let vars = parse_env_str(&String::from_utf8_lossy(&bytes));
    debug!(path = %path.display(), count = vars.len(), "parsed environment file");
    Ok(vars)
}

/// Key the value decoder is fed under, so any accepted key can reuse it.
const VALUE_KEY: &str = "SHOPIFYENV_VALUE";

/// Decodes dotenv text. Later assignments override earlier values.
///
/// Every line is read on its own, so one malformed line never hides the
/// lines after it. A quoted value spans lines only when its quote closes.
#[must_use]
pub fn parse_env_str(content: &str) -> EnvVars {
    let lines: Vec<&str> = content.lines().collect();
    let mut vars = EnvVars::new();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        let Some((key, raw)) = split_assignment(line) else {
            if !is_blank_or_comment(line) {
                debug!(line = index + 1, "skipping malformed line");
            }
            index += 1;
            continue;
        };
        let (value, consumed) = decode_value(raw, &lines[index + 1..]);
        vars.insert(key.to_string(), value);
        index += consumed;
    }
    vars
}

fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

/// Splits `[export] KEY=rest`. Keys are ASCII word characters, `.` and `-`.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    let line = line
        .strip_prefix("export")
        .filter(|rest| rest.starts_with([' ', '\t']))
        .map_or(line, str::trim_start);
    let (key, raw) = line.split_once('=')?;
    let key = key.trim_end();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    valid.then_some((key, raw))
}

/// Decodes one assignment's value and reports how many lines it used.
fn decode_value(raw: &str, following: &[&str]) -> (String, usize) {
    if let Some(value) = decode_with_dotenvy(raw) {
        return (value, 1);
    }
    if raw.trim_start().starts_with(['"', '\'']) {
        let mut joined = raw.to_string();
        for (extra, line) in following.iter().enumerate() {
            joined.push('\n');
            joined.push_str(line);
            if let Some(value) = decode_with_dotenvy(&joined) {
                return (value, extra + 2);
            }
        }
    }
    // Unclosed quote or a value dotenvy refuses: keep the text before any comment.
    let value = raw.split_once('#').map_or(raw, |(value, _)| value);
    (value.trim().to_string(), 1)
}

fn decode_with_dotenvy(raw: &str) -> Option<String> {
    let assignment = format!("{VALUE_KEY}={raw}");
    let mut items = dotenvy::from_read_iter(assignment.as_bytes());
    let (_, value) = items.next()?.ok()?;
    items.next().is_none().then_some(value)
}
