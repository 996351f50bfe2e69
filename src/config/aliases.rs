//! Import path aliases.
//!
//! An alias maps a path prefix used in `@import` statements (for example
//! `@/` or `theme/`) onto a directory. Aliases keep the order in which they
//! were configured because the resolver takes the first matching prefix.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One normalized alias entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAlias {
    /// Prefix matched against the start of an import path; always ends in `/`
    pub prefix: String,
    /// Directory substituted for the prefix; always ends in `/`, and starts
    /// with `./` when relative
    pub target: String,
}

/// Ordered collection of aliases.
///
/// Deserializes from a TOML table of `prefix = "target"` pairs; the table
/// order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "toml::Table", into = "toml::Table")]
pub struct AliasMap {
    entries: Vec<PathAlias>,
}

impl AliasMap {
    /// Create an empty alias map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(prefix, target)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (prefix, target) in pairs {
            map.insert(prefix.as_ref(), target.as_ref());
        }
        map
    }

    /// Add or replace an alias.
    ///
    /// Replacing keeps the original position so iteration order stays the
    /// order in which prefixes were first configured.
    pub fn insert(&mut self, prefix: &str, target: &str) {
        let alias = PathAlias {
            prefix: format_path(prefix, None, "/"),
            target: format_path(target, Some("./"), "/"),
        };
        match self.entries.iter_mut().find(|e| e.prefix == alias.prefix) {
            Some(existing) => existing.target = alias.target,
            None => self.entries.push(alias),
        }
    }

    /// First alias (in configuration order) whose prefix starts `path`.
    ///
    /// This is deliberately not a longest-prefix match.
    #[must_use]
    pub fn first_match(&self, path: &str) -> Option<&PathAlias> {
        self.entries.iter().find(|alias| path.starts_with(alias.prefix.as_str()))
    }

    /// Iterate aliases in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &PathAlias> {
        self.entries.iter()
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no aliases are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<toml::Table> for AliasMap {
    type Error = String;

    fn try_from(table: toml::Table) -> Result<Self, Self::Error> {
        let mut map = Self::new();
        for (prefix, target) in table {
            let Some(target) = target.as_str() else {
                return Err(format!("alias '{prefix}' must map to a path string, found {target}"));
            };
            map.insert(&prefix, target);
        }
        Ok(map)
    }
}

impl From<AliasMap> for toml::Table {
    fn from(map: AliasMap) -> Self {
        map.entries
            .into_iter()
            .map(|alias| (alias.prefix, toml::Value::String(alias.target)))
            .collect()
    }
}

/// Add a prefix (to relative paths only) and a suffix when missing.
fn format_path(path: &str, prefix: Option<&str>, suffix: &str) -> String {
    let mut formatted = path.to_string();

    if let Some(prefix) = prefix {
        if !Path::new(path).is_absolute() && !path.starts_with(prefix) {
            formatted = format!("{prefix}{formatted}");
        }
    }
    if !path.ends_with(suffix) {
        formatted.push_str(suffix);
    }

    formatted
}
