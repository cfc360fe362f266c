//! Remote Blob Store Abstractions
//!
//! Provides platform-agnostic traits for the per-account remote object
//! namespace and for the cache-fronted view of it that the engine consumes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Raw remote key-value blob store.
///
/// One opaque byte value per string key. The backend is eventually
/// consistent and offers no cross-key transactions; every call fails
/// independently of the others.
///
/// Note: some backends cannot truly remove a key. Callers that need to
/// "delete" a list-bearing key overwrite it with an empty JSON array
/// instead of relying on `delete`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the blob stored under `key`.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` when the key exists
    /// - `Ok(None)` when the key is absent (not an error)
    /// - `Err` when the store could not be reached or the read failed
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Bytes) -> Result<()>;

    /// Remove the blob stored under `key`.
    ///
    /// Deleting an absent key is a no-op, not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Cache-fronted blob store.
///
/// This is the interface the synchronization engine is written against: a
/// read-through/write-through cache over a [`RemoteStore`]. Cached content
/// must never be treated as authoritative when staleness matters, hence the
/// explicit `force_refresh` flag on reads.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::BlobStore;
///
/// async fn read_index(store: &dyn BlobStore) -> bridge_traits::error::Result<()> {
///     // Forced refresh before a read-modify-write cycle
///     let latest = store.get_item("music-library.json", true).await?;
///     let _ = latest;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob under `key`.
    ///
    /// With `force_refresh` set, the local cache is bypassed and the value
    /// is re-read from the remote store. Required before any
    /// read-modify-write cycle to avoid clobbering concurrent writers
    /// (best effort; the backend provides no locking).
    async fn get_item(&self, key: &str, force_refresh: bool) -> Result<Option<Bytes>>;

    /// Write-through put of `value` under `key`.
    async fn set_item(&self, key: &str, value: Bytes) -> Result<()>;

    /// Delete the blob under `key` and drop any cached copy.
    async fn delete_item(&self, key: &str) -> Result<()>;
}
