//! Local blob cache.
//!
//! A read-through/write-through LRU cache in front of the remote store.
//! The cache is a non-owning accelerant: its content is never treated as
//! authoritative when staleness matters, which is why every
//! read-modify-write cycle in the repositories reads with
//! `force_refresh = true` first.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::storage::{BlobStore, RemoteStore};
use bytes::Bytes;
use lru::LruCache;
use tracing::{debug, trace};

const DEFAULT_CAPACITY: usize = 256;

/// Cache-fronted [`BlobStore`] over a remote namespace.
///
/// - `get_item` serves cached values unless `force_refresh` is set, in
///   which case the remote value is re-read and the cache refreshed.
/// - `set_item` writes through: remote first, cache second, so a failed
///   remote put never leaves a phantom cached value.
/// - `delete_item` deletes remote first, then evicts.
///
/// Absence is never cached; a missing key is re-checked remotely on every
/// read.
pub struct CachedStore {
    remote: Arc<dyn RemoteStore>,
    cache: Mutex<LruCache<String, Bytes>>,
}

impl CachedStore {
    /// Create a cache with the default entry capacity.
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self::with_capacity(remote, DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` entries (minimum 1).
    pub fn with_capacity(remote: Arc<dyn RemoteStore>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            remote,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn cached(&self, key: &str) -> Option<Bytes> {
        self.cache.lock().unwrap().get(key).cloned()
    }

    fn fill(&self, key: &str, value: &Bytes) {
        self.cache
            .lock()
            .unwrap()
            .put(key.to_string(), value.clone());
    }

    fn evict(&self, key: &str) {
        self.cache.lock().unwrap().pop(key);
    }
}

#[async_trait]
impl BlobStore for CachedStore {
    async fn get_item(&self, key: &str, force_refresh: bool) -> Result<Option<Bytes>> {
        if !force_refresh {
            if let Some(hit) = self.cached(key) {
                trace!(key, "cache hit");
                return Ok(Some(hit));
            }
        }

        let fetched = self.remote.get(key).await?;
        match &fetched {
            Some(value) => {
                debug!(key, len = value.len(), force_refresh, "cache fill from remote");
                self.fill(key, value);
            }
            None => {
                // Absent keys are not cached; drop any stale copy.
                self.evict(key);
            }
        }
        Ok(fetched)
    }

    async fn set_item(&self, key: &str, value: Bytes) -> Result<()> {
        self.remote.put(key, value.clone()).await?;
        self.fill(key, &value);
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        self.remote.delete(key).await?;
        self.evict(key);
        Ok(())
    }
}
