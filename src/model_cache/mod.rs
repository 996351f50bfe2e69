//! Per-document region model cache.
//!
//! Extracting regions is a linear scan of the whole document, and editor
//! features ask for the model of the same document many times per edit. The
//! cache keeps one [`RegionModel`] per open document URI and rebuilds it only
//! when the document version (or language) changes.
//!
//! # Eviction
//!
//! - **Capacity**: once more than `max_entries` documents are cached, the
//!   entry with the oldest `last_access` is dropped
//! - **Idle time**: a background task sweeps entries not accessed within the
//!   TTL, once per TTL period
//! - **Close**: [`ModelCache::remove`] drops a document when the editor closes it
//!
//! # Concurrency
//!
//! Entries live behind one `std::sync::Mutex` that is held only for map
//! operations, never while a model is built. A model built for an older
//! version than the cached one is returned to its caller but never written
//! back. The sweeper is a tokio task that stops when [`ModelCache::dispose`]
//! is called or the cache is dropped.

use crate::constants::{DEFAULT_MODEL_CACHE_ENTRIES, default_model_ttl};
use crate::core::Language;
use crate::document::TextDocument;
use crate::embedded::{RegionModel, extract};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// One cached model.
#[derive(Debug, Clone)]
struct CacheEntry {
    version: i64,
    language: Language,
    last_access: Instant,
    model: Arc<RegionModel>,
}

#[derive(Debug)]
struct Inner {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: usize,
    ttl: Duration,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.last_access) < self.ttl);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("swept {removed} idle region models");
        }
        removed
    }
}

/// Bounded, time-aware cache of [`RegionModel`]s keyed by document URI.
#[derive(Debug)]
pub struct ModelCache {
    inner: Arc<Inner>,
    shutdown: Arc<Notify>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_CACHE_ENTRIES, default_model_ttl())
    }
}

impl ModelCache {
    /// Create a cache holding at most `max_entries` models.
    ///
    /// When called inside a tokio runtime and `ttl` is non-zero, a sweeper
    /// task is started that drops models idle for longer than `ttl`.
    #[must_use]
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let inner = Arc::new(Inner {
            entries: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
            ttl,
        });
        let shutdown = Arc::new(Notify::new());

        let sweeper = if ttl.is_zero() {
            None
        } else {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => Some(handle.spawn(sweep_loop(Arc::downgrade(&inner), Arc::clone(&shutdown), ttl))),
                Err(_) => {
                    tracing::debug!("no async runtime; region model TTL sweep disabled");
                    None
                }
            }
        };

        Self {
            inner,
            shutdown,
            sweeper: Mutex::new(sweeper),
        }
    }

    /// Model for `document`, built if missing or stale.
    pub fn get(&self, document: &TextDocument) -> Arc<RegionModel> {
        let language = document.language();
        {
            let mut entries = self.inner.lock();
            if let Some(entry) = entries.get_mut(&document.uri) {
                if entry.version == document.version && entry.language == language {
                    entry.last_access = Instant::now();
                    return Arc::clone(&entry.model);
                }
            }
        }

        let model = Arc::new(extract(&document.text));

        let mut entries = self.inner.lock();
        if let Some(existing) = entries.get(&document.uri) {
            if existing.version > document.version {
                tracing::debug!(
                    "not caching region model for {} v{} (cached v{})",
                    document.uri,
                    document.version,
                    existing.version
                );
                return model;
            }
        }

        entries.insert(
            document.uri.clone(),
            CacheEntry {
                version: document.version,
                language,
                last_access: Instant::now(),
                model: Arc::clone(&model),
            },
        );

        while entries.len() > self.inner.max_entries {
            let oldest = entries
                .iter()
                .filter(|(uri, _)| **uri != document.uri)
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(uri, _)| uri.clone());
            match oldest {
                Some(uri) => {
                    tracing::debug!("evicting region model for {uri}");
                    entries.remove(&uri);
                }
                None => break,
            }
        }

        model
    }

    /// Drop the model of a closed document.
    pub fn remove(&self, uri: &str) -> bool {
        self.inner.lock().remove(uri).is_some()
    }

    /// Drop models idle for longer than the TTL. Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        self.inner.sweep(Instant::now())
    }

    /// Whether a model for `uri` is cached.
    #[must_use]
    pub fn contains(&self, uri: &str) -> bool {
        self.inner.lock().contains_key(uri)
    }

    /// Cached version of `uri`.
    #[must_use]
    pub fn cached_version(&self, uri: &str) -> Option<i64> {
        self.inner.lock().get(uri).map(|e| e.version)
    }

    /// Number of cached models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Stop the sweeper and drop every model.
    pub fn dispose(&self) {
        self.shutdown.notify_one();
        if let Some(handle) = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
        self.inner.lock().clear();
    }

    #[cfg(test)]
    fn sweep_at(&self, now: Instant) -> usize {
        self.inner.sweep(now)
    }

    #[cfg(test)]
    fn sweeper_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ModelCache {
    fn drop(&mut self) {
        self.shutdown.notify_one();
        if let Some(handle) = self.sweeper.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
    }
}

async fn sweep_loop(inner: Weak<Inner>, shutdown: Arc<Notify>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            () = shutdown.notified() => break,
            _ = interval.tick() => {
                let Some(inner) = inner.upgrade() else { break };
                inner.sweep(Instant::now());
            }
        }
    }
}
