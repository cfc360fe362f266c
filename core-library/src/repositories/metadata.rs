//! Item metadata store.

use std::sync::Arc;

use bridge_traits::storage::BlobStore;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::{LibraryError, Result};
use crate::keys::metadata_key;
use crate::models::{ItemId, ItemMetadata};
use crate::repositories::ItemIndex;

/// Per-item descriptor records, one blob per item.
///
/// Items written before metadata records were introduced have no `-meta`
/// blob; lookups for those fall back to scanning the global item index and
/// return a degraded record (no size, no creation time, empty membership
/// set). The fallback is read-only degraded service: it never writes
/// anything back.
#[derive(Clone)]
pub struct ItemMetadataStore {
    store: Arc<dyn BlobStore>,
    index: ItemIndex,
}

impl ItemMetadataStore {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        let index = ItemIndex::new(store.clone());
        Self { store, index }
    }

    /// Fetch an item's metadata record.
    ///
    /// # Returns
    /// - `Ok(Some(full record))` when the metadata blob exists and parses
    /// - `Ok(Some(degraded record))` when it doesn't but the global index
    ///   still lists the item
    /// - `Ok(None)` when the item is unknown everywhere
    /// - `Err` when the store itself failed
    pub async fn get(&self, id: ItemId) -> Result<Option<ItemMetadata>> {
        let raw = self.store.get_item(&metadata_key(id), false).await?;

        if let Some(raw) = raw {
            match serde_json::from_slice::<ItemMetadata>(&raw) {
                Ok(metadata) => return Ok(Some(metadata)),
                Err(err) => {
                    warn!(item_id = %id, error = %err, "metadata blob is malformed, falling back to index scan");
                }
            }
        }

        Ok(self.scan_index(id).await)
    }

    /// Persist an item's metadata record, last-write-wins.
    ///
    /// # Errors
    /// `InvalidInput` when the id is nil or the record fails validation.
    pub async fn set(&self, id: ItemId, metadata: &ItemMetadata) -> Result<()> {
        if id.is_nil() {
            return Err(LibraryError::InvalidInput {
                field: "id".to_string(),
                message: "item id is required".to_string(),
            });
        }
        metadata
            .validate()
            .map_err(|message| LibraryError::InvalidInput {
                field: "metadata".to_string(),
                message,
            })?;

        let raw = serde_json::to_vec(metadata)?;
        self.store.set_item(&metadata_key(id), Bytes::from(raw)).await?;
        debug!(item_id = %id, "metadata record written");
        Ok(())
    }

    /// Degraded lookup: find the item's summary in the global index.
    async fn scan_index(&self, id: ItemId) -> Option<ItemMetadata> {
        let outcome = self.index.list(false).await;
        let summary = outcome.list.iter().find(|entry| entry.id == id)?;
        warn!(item_id = %id, "serving degraded metadata from index summary");
        Some(ItemMetadata::degraded(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedStore;
    use crate::keys::ITEM_INDEX_KEY;
    use crate::models::ItemSummary;
    use bridge_memory::MemoryStore;
    use uuid::Uuid;

    fn setup() -> (Arc<MemoryStore>, ItemMetadataStore) {
        let remote = Arc::new(MemoryStore::new());
        let store = Arc::new(CachedStore::new(remote.clone()));
        (remote, ItemMetadataStore::new(store))
    }

    #[tokio::test]
    async fn test_set_then_get_full_record() {
        let (_, metadata_store) = setup();
        let id = ItemId::new();
        let mut metadata = ItemMetadata::new(id, "song.mp3", 2048);
        metadata.playlist_ids.insert(crate::models::PlaylistId::new());

        metadata_store.set(id, &metadata).await.unwrap();
        let fetched = metadata_store.get(id).await.unwrap().unwrap();

        assert_eq!(fetched, metadata);
    }

    #[tokio::test]
    async fn test_fallback_to_index_scan_is_degraded_and_read_only() {
        let (remote, metadata_store) = setup();
        let id = ItemId::new();
        let index_json =
            serde_json::to_vec(&vec![ItemSummary::new(id, "legacy.mp3")]).unwrap();
        remote.seed(ITEM_INDEX_KEY, index_json);

        let fetched = metadata_store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.filename, "legacy.mp3");
        assert!(fetched.size_bytes.is_none());
        assert!(fetched.playlist_ids.is_empty());

        // The fallback must not create a metadata blob.
        assert!(!remote.contains(&metadata_key(id)));
    }

    #[tokio::test]
    async fn test_unknown_item_is_none() {
        let (_, metadata_store) = setup();
        assert!(metadata_store.get(ItemId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_record_falls_back() {
        let (remote, metadata_store) = setup();
        let id = ItemId::new();
        remote.seed(&metadata_key(id), "not-json");
        let index_json =
            serde_json::to_vec(&vec![ItemSummary::new(id, "broken.mp3")]).unwrap();
        remote.seed(ITEM_INDEX_KEY, index_json);

        let fetched = metadata_store.get(id).await.unwrap().unwrap();
        assert!(fetched.size_bytes.is_none());
        assert_eq!(fetched.filename, "broken.mp3");
    }

    #[tokio::test]
    async fn test_set_rejects_nil_id_and_invalid_record() {
        let (_, metadata_store) = setup();
        let metadata = ItemMetadata::new(ItemId::new(), "x.mp3", 1);

        let err = metadata_store.set(ItemId(Uuid::nil()), &metadata).await;
        assert!(matches!(err, Err(LibraryError::InvalidInput { .. })));

        let mut empty_name = metadata.clone();
        empty_name.filename = String::new();
        let err = metadata_store.set(metadata.id, &empty_name).await;
        assert!(matches!(err, Err(LibraryError::InvalidInput { .. })));
    }
}
