//! Persistent per-file symbol cache.
//!
//! Parsed symbol tables are kept per absolute path for the lifetime of the
//! cache object, across requests, until the owner invalidates them. The
//! owner clears everything on configuration changes and invalidates single
//! paths when the file watcher reports a change.
//!
//! Uses `DashMap` so concurrent requests can read and fill the cache without
//! a global lock. Tables are shared as `Arc<SymbolTable>`; a lookup never
//! copies symbol data.

use crate::core::Dialect;
use crate::parser::SymbolTable;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A cached table with the dialect it was parsed as.
#[derive(Debug, Clone)]
pub struct CachedTable {
    /// Dialect used to parse the file
    pub dialect: Dialect,
    /// Extracted symbols
    pub table: Arc<SymbolTable>,
}

/// Cache hit/load counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Files read from disk and parsed
    pub loads: usize,
}

/// Process-wide symbol table cache keyed by absolute path.
#[derive(Debug, Default)]
pub struct SymbolCache {
    entries: DashMap<PathBuf, CachedTable>,
    hits: AtomicUsize,
    loads: AtomicUsize,
}

impl SymbolCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached table for `path`, counting a hit when present.
    pub fn get(&self, path: &Path) -> Option<CachedTable> {
        let entry = self.entries.get(path).map(|e| e.value().clone());
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    /// Store a freshly parsed table, replacing any previous entry.
    pub fn insert(&self, path: PathBuf, dialect: Dialect, table: SymbolTable) -> Arc<SymbolTable> {
        let table = Arc::new(table);
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            path,
            CachedTable {
                dialect,
                table: Arc::clone(&table),
            },
        );
        table
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let count = self.entries.len();
        self.entries.clear();
        tracing::debug!("cleared {count} cached symbol tables");
    }

    /// Whether `path` has an entry.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of cached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters since creation.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
        }
    }
}
