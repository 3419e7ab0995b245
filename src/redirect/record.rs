//! Redirect records and the path-to-URL mapping built from them.
//!
//! # Responsibilities
//! - Decode a redirect document (YAML or JSON) into `PathRecord`s
//! - Fold records into an immutable `PathMapping`
//!
//! # Design Decisions
//! - Only the document shape is checked; paths and URLs are taken as-is
//! - Duplicate paths resolve last-write-wins, in document order
//! - Empty targets are kept in the mapping but never resolve

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One configured redirect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathRecord {
    /// Request path to match, e.g. `/urlshort`.
    pub path: String,

    /// Redirect target.
    pub url: String,
}

impl PathRecord {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Serialization format of a redirect document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Infer the format from a file extension. Anything other than `.json`
    /// is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// A redirect document that does not have the expected shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML redirect document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON redirect document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a sequence of `{path, url}` records.
///
/// A payload with no content, or a null document, decodes to no records.
pub fn parse_config(bytes: &[u8], format: ConfigFormat) -> Result<Vec<PathRecord>, ParseError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let records: Option<Vec<PathRecord>> = match format {
        ConfigFormat::Yaml => serde_yaml::from_slice(bytes)?,
        ConfigFormat::Json => serde_json::from_slice(bytes)?,
    };
    Ok(records.unwrap_or_default())
}

/// Fold records into a mapping; a later record for the same path replaces
/// an earlier one.
pub fn build_mapping<I>(records: I) -> PathMapping
where
    I: IntoIterator<Item = PathRecord>,
{
    records.into_iter().collect()
}

/// Resolved path -> URL table. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    entries: HashMap<String, String>,
}

impl PathMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect target for `path`, if there is a non-empty one.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.entries
            .get(path)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Raw stored value, including empty targets.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

impl From<HashMap<String, String>> for PathMapping {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl FromIterator<PathRecord> for PathMapping {
    fn from_iter<T: IntoIterator<Item = PathRecord>>(iter: T) -> Self {
        let mut mapping = PathMapping::new();
        mapping.extend(iter);
        mapping
    }
}

impl Extend<PathRecord> for PathMapping {
    fn extend<T: IntoIterator<Item = PathRecord>>(&mut self, iter: T) {
        for record in iter {
            self.entries.insert(record.path, record.url);
        }
    }
}
