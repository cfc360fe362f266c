//! # In-Memory Store Bridge
//!
//! A [`RemoteStore`] implementation backed by a process-local map.
//!
//! ## Overview
//!
//! This crate is the host adapter used by tests and by desktop shims that
//! run without a configured remote account. Besides plain storage it
//! supports per-key failure injection so callers can exercise the
//! partial-failure paths of the synchronization engine, and it counts
//! `get` calls per key so cache bypass behaviour can be asserted on.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result};
use bridge_traits::storage::RemoteStore;
use bytes::Bytes;
use tracing::debug;

#[derive(Default)]
struct Inner {
    blobs: HashMap<String, Bytes>,
    fail_gets: HashSet<String>,
    fail_puts: HashSet<String>,
    fail_deletes: HashSet<String>,
    get_calls: HashMap<String, u64>,
}

/// In-memory remote store with failure injection.
///
/// All state lives behind a `Mutex`; the lock is never held across an await
/// point, so the type is safe to share between tasks.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `get` calls for `key` fail.
    pub fn fail_get(&self, key: &str) {
        self.inner.lock().unwrap().fail_gets.insert(key.to_string());
    }

    /// Make subsequent `put` calls for `key` fail.
    pub fn fail_put(&self, key: &str) {
        self.inner.lock().unwrap().fail_puts.insert(key.to_string());
    }

    /// Make subsequent `delete` calls for `key` fail.
    pub fn fail_delete(&self, key: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_deletes
            .insert(key.to_string());
    }

    /// Clear all injected failures.
    pub fn clear_failures(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_gets.clear();
        inner.fail_puts.clear();
        inner.fail_deletes.clear();
    }

    /// Number of `get` calls observed for `key`.
    pub fn get_count(&self, key: &str) -> u64 {
        self.inner
            .lock()
            .unwrap()
            .get_calls
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Whether a blob currently exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().unwrap().blobs.contains_key(key)
    }

    /// Direct snapshot of the blob under `key`, bypassing the trait.
    pub fn snapshot(&self, key: &str) -> Option<Bytes> {
        self.inner.lock().unwrap().blobs.get(key).cloned()
    }

    /// Seed a blob without going through the trait.
    pub fn seed(&self, key: &str, value: impl Into<Bytes>) {
        self.inner
            .lock()
            .unwrap()
            .blobs
            .insert(key.to_string(), value.into());
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let mut inner = self.inner.lock().unwrap();
        *inner.get_calls.entry(key.to_string()).or_insert(0) += 1;
        if inner.fail_gets.contains(key) {
            return Err(BridgeError::operation(key, "injected get failure"));
        }
        Ok(inner.blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_puts.contains(key) {
            return Err(BridgeError::operation(key, "injected put failure"));
        }
        debug!(key, len = value.len(), "memory store put");
        inner.blobs.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_deletes.contains(key) {
            return Err(BridgeError::operation(key, "injected delete failure"));
        }
        inner.blobs.remove(key);
        Ok(())
    }
}
