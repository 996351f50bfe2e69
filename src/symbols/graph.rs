//! Transitive symbol resolution across imports.
//!
//! [`SymbolGraph::resolve_closure`] starts from a set of roots (files on disk
//! or the text of an open document), follows every import and returns the
//! symbol tables of all stylesheets reached, keyed by absolute path.
//!
//! # Order
//!
//! The walk is a depth-first traversal emitting each file after its imports
//! (dependency first). Flattening a [`ResolvedSymbolMap`] therefore lets an
//! importer's own declaration override an imported one with the same name.
//!
//! # Failure handling
//!
//! Nothing in the walk is fatal. A file that cannot be read (missing, not
//! UTF-8, or slower than the read timeout) contributes no entry; a file that
//! cannot be parsed contributes an empty table. Each path is visited at most
//! once per call, so import cycles terminate.

use super::cache::{CachedTable, SymbolCache};
use crate::constants::default_read_timeout;
use crate::core::file_error::FileOps;
use crate::core::{Dialect, StyleError};
use crate::parser::{SymbolTable, Variable, parse_symbols};
use crate::resolver::PathResolver;
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where a closure walk starts.
#[derive(Debug, Clone)]
pub enum SymbolRoot {
    /// A stylesheet on disk; relative paths resolve against the project root
    Path(PathBuf),
    /// The current text of an open document (never cached)
    Content {
        /// Path of the document, used to resolve its relative imports
        path: PathBuf,
        /// Dialect to parse the text as
        dialect: Dialect,
        /// Document text (or a projection of it)
        text: String,
    },
}

/// Options for one closure walk.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Only return (and only follow imports into) these dialects; `None`
    /// allows all
    pub dialect_filter: Option<Vec<Dialect>>,
    /// Re-read and re-parse every visited file instead of using the cache
    pub force_refresh: bool,
}

impl ResolveOptions {
    /// Restrict the walk to `dialects`.
    #[must_use]
    pub fn with_filter(mut self, dialects: impl IntoIterator<Item = Dialect>) -> Self {
        self.dialect_filter = Some(dialects.into_iter().collect());
        self
    }

    /// Bypass the cache for every visited file.
    #[must_use]
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    fn allows(&self, dialect: Dialect) -> bool {
        self.dialect_filter.as_ref().is_none_or(|filter| filter.contains(&dialect))
    }
}

/// One stylesheet in a resolved closure.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Dialect the file was parsed as
    pub dialect: Dialect,
    /// Extracted symbols
    pub table: Arc<SymbolTable>,
}

/// Symbol tables of a closure, in dependency-first order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSymbolMap {
    entries: Vec<ResolvedEntry>,
}

impl ResolvedSymbolMap {
    /// Table for `path`, if it is part of the closure.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&SymbolTable> {
        self.entries.iter().find(|e| e.path == path).map(|e| e.table.as_ref())
    }

    /// Entries in dependency-first order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedEntry> {
        self.entries.iter()
    }

    /// Paths in dependency-first order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    /// Number of stylesheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the closure is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the entries of `other` not already present.
    ///
    /// Entries are identified by path and dialect, so the per-dialect
    /// projections of one markup document are kept side by side.
    pub fn merge(&mut self, other: ResolvedSymbolMap) {
        for entry in other.entries {
            if !self.entries.iter().any(|e| e.path == entry.path && e.dialect == entry.dialect) {
                self.entries.push(entry);
            }
        }
    }

    /// Append every entry of `other`, dropping entries of `self` with the
    /// same path and dialect first.
    ///
    /// Used to lay an open document's closure over a background map: the
    /// document's in-memory table replaces any copy read from disk, and its
    /// declarations come last so they win in [`flatten`](Self::flatten).
    pub fn overlay(&mut self, other: ResolvedSymbolMap) {
        self.entries.retain(|e| {
            !other.entries.iter().any(|o| o.path == e.path && o.dialect == e.dialect)
        });
        self.entries.extend(other.entries);
    }

    /// Every variable with the file that declares it, in merge order.
    pub fn variables(&self) -> impl Iterator<Item = (&ResolvedEntry, &Variable)> {
        self.entries.iter().flat_map(|e| e.table.variables.iter().map(move |v| (e, v)))
    }

    /// Name to value map; later declarations override earlier ones.
    ///
    /// With `dialect` set, only files of that dialect contribute.
    #[must_use]
    pub fn flatten(&self, dialect: Option<Dialect>) -> HashMap<String, String> {
        self.variables()
            .filter(|(entry, _)| dialect.is_none_or(|d| d == entry.dialect))
            .map(|(_, v)| (v.name.clone(), v.value.clone()))
            .collect()
    }

    /// The winning declaration of `name` that has a known offset.
    #[must_use]
    pub fn find_variable(&self, name: &str, dialect: Option<Dialect>) -> Option<(&Path, &Variable)> {
        self.entries
            .iter()
            .rev()
            .filter(|e| dialect.is_none_or(|d| d == e.dialect))
            .find_map(|e| {
                e.table
                    .variables
                    .iter()
                    .rev()
                    .find(|v| v.name == name && v.offset.is_some())
                    .map(|v| (e.path.as_path(), v))
            })
    }
}

enum Step {
    Enter {
        path: PathBuf,
        importer: Option<(String, PathBuf)>,
    },
    Exit(ResolvedEntry),
}

/// Resolves import closures against a shared [`SymbolCache`].
#[derive(Debug, Clone)]
pub struct SymbolGraph {
    cache: Arc<SymbolCache>,
    resolver: PathResolver,
    read_timeout: Duration,
}

impl SymbolGraph {
    /// Create a graph using `cache` and `resolver`.
    pub fn new(cache: Arc<SymbolCache>, resolver: PathResolver) -> Self {
        Self {
            cache,
            resolver,
            read_timeout: default_read_timeout(),
        }
    }

    /// Set the per-file read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<SymbolCache> {
        &self.cache
    }

    /// The path resolver.
    #[must_use]
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Resolve the closure of `roots`.
    ///
    /// Content roots default their dialect filter to their own dialect when
    /// `options` carries none.
    pub async fn resolve_closure(
        &self,
        roots: &[SymbolRoot],
        options: &ResolveOptions,
    ) -> ResolvedSymbolMap {
        let mut visited = HashSet::new();
        let mut resolved = ResolvedSymbolMap::default();

        for root in roots {
            match root {
                SymbolRoot::Path(path) => {
                    let path = self.resolver.resolve(&path.to_string_lossy(), self.resolver.root_dir());
                    self.walk(path, None, options, &mut visited, &mut resolved).await;
                }
                SymbolRoot::Content {
                    path,
                    dialect,
                    text,
                } => {
                    let table = Arc::new(parse_symbols(text, path, *dialect));
                    let content_options = match options.dialect_filter {
                        Some(_) => options.clone(),
                        None => options.clone().with_filter([*dialect]),
                    };
                    self.walk_from(
                        ResolvedEntry {
                            path: path.clone(),
                            dialect: *dialect,
                            table,
                        },
                        &content_options,
                        &mut visited,
                        &mut resolved,
                    )
                    .await;
                }
            }
        }

        tracing::debug!(
            "resolved {} stylesheets from {} roots ({} visited)",
            resolved.len(),
            roots.len(),
            visited.len()
        );
        resolved
    }

    async fn walk(
        &self,
        path: PathBuf,
        importer: Option<(String, PathBuf)>,
        options: &ResolveOptions,
        visited: &mut HashSet<PathBuf>,
        out: &mut ResolvedSymbolMap,
    ) {
        self.run(
            vec![Step::Enter {
                path,
                importer,
            }],
            options,
            visited,
            out,
        )
        .await;
    }

    /// Walk the imports of an already parsed entry, then emit it.
    ///
    /// The entry is emitted even when its path was visited before: several
    /// content roots may share the path of one markup document.
    async fn walk_from(
        &self,
        entry: ResolvedEntry,
        options: &ResolveOptions,
        visited: &mut HashSet<PathBuf>,
        out: &mut ResolvedSymbolMap,
    ) {
        visited.insert(entry.path.clone());
        let mut stack = Vec::new();
        self.push_imports(&entry, options, &mut stack);
        stack.insert(0, Step::Exit(entry));
        self.run(stack, options, visited, out).await;
    }

    async fn run(
        &self,
        mut stack: Vec<Step>,
        options: &ResolveOptions,
        visited: &mut HashSet<PathBuf>,
        out: &mut ResolvedSymbolMap,
    ) {
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter {
                    path,
                    importer,
                } => {
                    if !visited.insert(path.clone()) {
                        continue;
                    }
                    let Some(cached) = self.load(&path, options.force_refresh).await else {
                        if let Some((import, importer)) = importer {
                            let error = StyleError::UnresolvedImport {
                                import,
                                importer: importer.display().to_string(),
                            };
                            tracing::debug!("{error}");
                        }
                        continue;
                    };
                    let entry = ResolvedEntry {
                        path,
                        dialect: cached.dialect,
                        table: cached.table,
                    };
                    stack.push(Step::Exit(entry.clone()));
                    self.push_imports(&entry, options, &mut stack);
                }
                Step::Exit(entry) => {
                    if options.allows(entry.dialect) {
                        out.entries.push(entry);
                    }
                }
            }
        }
    }

    /// Queue the imports of `entry` so the first import is walked first.
    fn push_imports(&self, entry: &ResolvedEntry, options: &ResolveOptions, stack: &mut Vec<Step>) {
        for import in entry.table.imports.iter().rev() {
            let target = self.resolver.resolve_import(&import.path, &entry.path, entry.dialect);
            if !options.allows(Dialect::from_path(&target)) {
                continue;
            }
            stack.push(Step::Enter {
                path: target,
                importer: Some((import.path.clone(), entry.path.clone())),
            });
        }
    }

    /// Re-read and re-parse one file, replacing its cached table.
    ///
    /// Returns `false` (and drops any cached table) when the file can no
    /// longer be read.
    pub async fn refresh(&self, path: &Path) -> bool {
        self.load(path, true).await.is_some()
    }

    /// Cached table for `path`, or read and parse it.
    async fn load(&self, path: &Path, force_refresh: bool) -> Option<CachedTable> {
        if !force_refresh {
            if let Some(cached) = self.cache.get(path) {
                return Some(cached);
            }
        }

        let dialect = Dialect::from_path(path);
        match FileOps::read_with_timeout(path, self.read_timeout, "symbol extraction", "symbols::graph")
            .await
        {
            Ok(text) => {
                let table = parse_symbols(&text, path, dialect);
                let table = self.cache.insert(path.to_path_buf(), dialect, table);
                Some(CachedTable {
                    dialect,
                    table,
                })
            }
            Err(e) => {
                if force_refresh {
                    self.cache.invalidate(path);
                }
                if e.is_not_found() {
                    tracing::debug!("{}", e.user_message());
                } else if e.source.kind() == ErrorKind::TimedOut {
                    let error = StyleError::FileReadTimeout {
                        path: path.display().to_string(),
                        timeout_ms: u64::try_from(self.read_timeout.as_millis()).unwrap_or(u64::MAX),
                    };
                    tracing::warn!("{error}");
                } else {
                    tracing::warn!("{}", e.user_message());
                }
                None
            }
        }
    }
}
