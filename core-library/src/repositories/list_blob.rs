//! Shared read/write helpers for ordered-list blobs.
//!
//! All list blobs are UTF-8 JSON arrays. An absent key is the logically
//! empty list; so is a zero-length or all-whitespace value, because
//! "deleting" a list-bearing key is implemented as an overwrite (the remote
//! store cannot truly remove keys).

use bridge_traits::storage::BlobStore;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{ErrorKind, ListOutcome, Result};

/// Load and parse the list blob under `key`.
///
/// Missing blob: empty list, no error (the index has not been created
/// yet). Retrieval failure or malformed content: empty list plus a
/// `ReadFailed` issue. Never returns `Err`; callers render whatever came
/// back.
pub(crate) async fn load_list<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
    force_refresh: bool,
) -> ListOutcome<T> {
    let raw = match store.get_item(key, force_refresh).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return ListOutcome::ok(Vec::new()),
        Err(err) => {
            warn!(key, error = %err, "list blob fetch failed");
            return ListOutcome::empty_with(ErrorKind::ReadFailed);
        }
    };

    if raw.iter().all(u8::is_ascii_whitespace) {
        return ListOutcome::ok(Vec::new());
    }

    match serde_json::from_slice(&raw) {
        Ok(list) => ListOutcome::ok(list),
        Err(err) => {
            warn!(key, error = %err, "list blob is malformed");
            ListOutcome::empty_with(ErrorKind::ReadFailed)
        }
    }
}

/// Serialize `list` and overwrite the blob under `key`.
pub(crate) async fn store_list<T: Serialize>(
    store: &dyn BlobStore,
    key: &str,
    list: &[T],
) -> Result<()> {
    let raw = serde_json::to_vec(list)?;
    store.set_item(key, Bytes::from(raw)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemSummary;
    use bridge_memory::MemoryStore;
    use std::sync::Arc;

    use crate::cache::CachedStore;
    use crate::models::ItemId;

    fn store_over(remote: Arc<MemoryStore>) -> CachedStore {
        CachedStore::new(remote)
    }

    #[tokio::test]
    async fn test_absent_blob_is_empty_list_without_error() {
        let store = store_over(Arc::new(MemoryStore::new()));
        let outcome: ListOutcome<ItemSummary> = load_list(&store, "missing", true).await;

        assert!(outcome.list.is_empty());
        assert!(outcome.is_clean());
    }

    #[tokio::test]
    async fn test_empty_content_reads_as_empty_list() {
        let remote = Arc::new(MemoryStore::new());
        remote.seed("k", "");
        let store = store_over(remote);

        let outcome: ListOutcome<ItemSummary> = load_list(&store, "k", true).await;
        assert!(outcome.list.is_empty());
        assert!(outcome.is_clean());
    }

    #[tokio::test]
    async fn test_malformed_content_reports_read_failed() {
        let remote = Arc::new(MemoryStore::new());
        remote.seed("k", "{not json");
        let store = store_over(remote);

        let outcome: ListOutcome<ItemSummary> = load_list(&store, "k", true).await;
        assert!(outcome.list.is_empty());
        assert_eq!(outcome.errors[0].kind, ErrorKind::ReadFailed);
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_read_failed() {
        let remote = Arc::new(MemoryStore::new());
        remote.fail_get("k");
        let store = store_over(remote);

        let outcome: ListOutcome<ItemSummary> = load_list(&store, "k", true).await;
        assert_eq!(outcome.errors, vec![crate::error::Issue::of(ErrorKind::ReadFailed)]);
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_order() {
        let store = store_over(Arc::new(MemoryStore::new()));
        let entries = vec![
            ItemSummary::new(ItemId::new(), "first.mp3"),
            ItemSummary::new(ItemId::new(), "second.mp3"),
        ];

        store_list(&store, "k", &entries).await.unwrap();
        let outcome: ListOutcome<ItemSummary> = load_list(&store, "k", true).await;

        assert_eq!(outcome.list, entries);
    }
}
