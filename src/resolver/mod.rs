//! Path resolution for imports and global style entries.
//!
//! [`PathResolver`] bundles the project root with the configured aliases so
//! the symbol graph can resolve every import the same way. The free
//! functions in [`path`] do the actual work and are usable on their own.

pub mod path;

use crate::config::AliasMap;
use crate::core::Dialect;
use std::path::{Path, PathBuf};

pub use path::{normalize_path, resolve_import, resolve_path};

/// Resolves import paths against one project root and alias set.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root_dir: PathBuf,
    aliases: AliasMap,
}

impl PathResolver {
    /// Create a resolver for `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>, aliases: AliasMap) -> Self {
        Self {
            root_dir: root_dir.into(),
            aliases,
        }
    }

    /// Project root used for alias and package lookups.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Configured aliases.
    #[must_use]
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Resolve `raw` relative to `base` (a file or directory).
    #[must_use]
    pub fn resolve(&self, raw: &str, base: &Path) -> PathBuf {
        resolve_path(raw, base, &self.aliases, &self.root_dir)
    }

    /// Resolve an import written in a `dialect` stylesheet at `importer`.
    #[must_use]
    pub fn resolve_import(&self, raw: &str, importer: &Path, dialect: Dialect) -> PathBuf {
        resolve_import(raw, importer, dialect, &self.aliases, &self.root_dir)
    }
}
