pub mod storage;
pub mod types;

use crate::cache::storage::{NamespaceEntries, load_entries, write_entries};
use crate::cache::types::{CacheEntry, CacheKey, CacheNamespace};
use crate::clock::Clock;
use crate::error::CacheError;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// One namespace held in memory and mirrored to its own file.
struct NamespaceCache {
    path: PathBuf,
    ttl: Duration,
    entries: RwLock<NamespaceEntries>,
    // Serializes mutate-and-persist so files are never written out of order
    writer: Mutex<()>,
}

impl NamespaceCache {
    async fn persist(&self) -> Result<(), CacheError> {
        let entries = self.entries.read().await;
        write_entries(&self.path, &entries).await
    }
}

/// Persistent key/value cache partitioned into namespaces, each with its own
/// expiry. Namespaces load lazily on first access and are rewritten whole on
/// every mutation. Expired entries stay on disk until [`CacheStore::sweep`].
pub struct CacheStore {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
    ttls: FxHashMap<CacheNamespace, Duration>,
    namespaces: RwLock<FxHashMap<CacheNamespace, Arc<NamespaceCache>>>,
}

impl CacheStore {
    pub async fn open(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self, CacheError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let ttls = CacheNamespace::ALL
            .iter()
            .map(|namespace| (*namespace, namespace.default_ttl()))
            .collect();

        Ok(Self {
            dir,
            clock,
            ttls,
            namespaces: RwLock::new(FxHashMap::default()),
        })
    }

    /// Overrides a namespace's expiry. Only affects namespaces not yet loaded.
    pub fn with_ttl(mut self, namespace: CacheNamespace, ttl: Duration) -> Self {
        self.ttls.insert(namespace, ttl);
        self
    }

    pub fn ttl(&self, namespace: CacheNamespace) -> Duration {
        self.ttls
            .get(&namespace)
            .copied()
            .unwrap_or_else(|| namespace.default_ttl())
    }

    pub fn file_path(&self, namespace: CacheNamespace) -> PathBuf {
        self.dir.join(namespace.file_name())
    }

    pub async fn get(&self, namespace: CacheNamespace, key: &CacheKey) -> Option<CacheEntry> {
        let cache = self.namespace(namespace).await;
        let now = self.clock.now();
        let entries = cache.entries.read().await;

        entries
            .get(key.as_str())
            .filter(|entry| entry.is_fresh(now, cache.ttl))
            .cloned()
    }

    /// Fresh entry decoded into `T`. A payload that no longer matches `T` is
    /// treated as a miss.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        namespace: CacheNamespace,
        key: &CacheKey,
    ) -> Option<T> {
        let entry = self.get(namespace, key).await?;

        match serde_json::from_value(entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%namespace, %key, error = %e, "Ignoring inconsistent cache entry");
                None
            }
        }
    }

    pub async fn put<T: Serialize>(
        &self,
        namespace: CacheNamespace,
        key: &CacheKey,
        payload: &T,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_value(payload)?;
        let cache = self.namespace(namespace).await;
        let _writer = cache.writer.lock().await;

        let previous = {
            let mut entries = cache.entries.write().await;
            entries.insert(
                key.as_str().to_string(),
                CacheEntry {
                    payload,
                    stored_at: self.clock.now(),
                },
            )
        };

        if let Err(e) = cache.persist().await {
            // Memory must not hold what the file does not
            let mut entries = cache.entries.write().await;
            match previous {
                Some(previous) => {
                    entries.insert(key.as_str().to_string(), previous);
                }
                None => {
                    entries.remove(key.as_str());
                }
            }
            return Err(e);
        }

        Ok(())
    }

    /// Drops every expired entry of `namespace` and rewrites its file.
    /// Returns how many entries were removed.
    pub async fn sweep(&self, namespace: CacheNamespace) -> Result<usize, CacheError> {
        let cache = self.namespace(namespace).await;
        let _writer = cache.writer.lock().await;
        let now = self.clock.now();

        let (removed, remaining) = {
            let mut entries = cache.entries.write().await;
            let before = entries.len();
            entries.retain(|_, entry| entry.is_fresh(now, cache.ttl));
            (before - entries.len(), entries.len())
        };

        if removed == 0 && remaining == 0 {
            return Ok(0);
        }

        cache.persist().await?;
        Ok(removed)
    }

    /// Startup pass over every namespace. Failures are logged, not returned.
    pub async fn sweep_all(&self) -> usize {
        let mut total_removed = 0;

        for namespace in CacheNamespace::ALL {
            match self.sweep(namespace).await {
                Ok(removed) => {
                    if removed > 0 {
                        info!(%namespace, removed, "Swept expired cache entries");
                    }
                    total_removed += removed;
                }
                Err(e) => warn!(%namespace, error = %e, "Failed to sweep cache namespace"),
            }
        }

        total_removed
    }

    async fn namespace(&self, namespace: CacheNamespace) -> Arc<NamespaceCache> {
        if let Some(cache) = self.namespaces.read().await.get(&namespace) {
            return Arc::clone(cache);
        }

        let mut namespaces = self.namespaces.write().await;
        if let Some(cache) = namespaces.get(&namespace) {
            return Arc::clone(cache);
        }

        let path = self.file_path(namespace);
        let entries = load_entries(&path).await;
        let cache = Arc::new(NamespaceCache {
            path,
            ttl: self.ttl(namespace),
            entries: RwLock::new(entries),
            writer: Mutex::new(()),
        });
        namespaces.insert(namespace, Arc::clone(&cache));

        cache
    }
}
