//! Per-playlist membership list repository.

use std::sync::Arc;

use bridge_traits::storage::BlobStore;
use bytes::Bytes;
use tracing::debug;

use crate::error::{ListOutcome, Result};
use crate::keys::membership_key;
use crate::models::{ItemSummary, PlaylistId};
use crate::repositories::list_blob::{load_list, store_list};

/// One ordered list blob per playlist, most-recently-added first.
///
/// Created empty at playlist-creation time. The remote store cannot delete
/// keys, so [`clear`](MembershipLists::clear) overwrites with an empty
/// array; that is the documented meaning of membership-list deletion.
#[derive(Clone)]
pub struct MembershipLists {
    store: Arc<dyn BlobStore>,
}

impl MembershipLists {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Read one playlist's membership list. Force the refresh before any
    /// read-modify-write.
    pub async fn list(&self, id: PlaylistId, force_refresh: bool) -> ListOutcome<ItemSummary> {
        load_list(self.store.as_ref(), &membership_key(id), force_refresh).await
    }

    /// Overwrite one playlist's membership list with `entries`.
    pub async fn save(&self, id: PlaylistId, entries: &[ItemSummary]) -> Result<()> {
        store_list(self.store.as_ref(), &membership_key(id), entries).await
    }

    /// Logically delete the list by overwriting it with an empty array.
    pub async fn clear(&self, id: PlaylistId) -> Result<()> {
        debug!(playlist_id = %id, "clearing membership list");
        self.store
            .set_item(&membership_key(id), Bytes::from_static(b"[]"))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedStore;
    use crate::models::ItemId;
    use bridge_memory::MemoryStore;

    fn lists() -> (Arc<MemoryStore>, MembershipLists) {
        let remote = Arc::new(MemoryStore::new());
        let store = Arc::new(CachedStore::new(remote.clone()));
        (remote, MembershipLists::new(store))
    }

    #[tokio::test]
    async fn test_roundtrip_per_playlist() {
        let (_, lists) = lists();
        let a = PlaylistId::new();
        let b = PlaylistId::new();

        lists
            .save(a, &[ItemSummary::new(ItemId::new(), "a.mp3")])
            .await
            .unwrap();

        assert_eq!(lists.list(a, true).await.list.len(), 1);
        assert!(lists.list(b, true).await.list.is_empty());
    }

    #[tokio::test]
    async fn test_clear_overwrites_with_empty_array() {
        let (remote, lists) = lists();
        let id = PlaylistId::new();

        lists
            .save(id, &[ItemSummary::new(ItemId::new(), "a.mp3")])
            .await
            .unwrap();
        lists.clear(id).await.unwrap();

        // The key still exists; its content is the empty array.
        assert_eq!(remote.snapshot(&membership_key(id)).unwrap().as_ref(), b"[]");
        assert!(lists.list(id, true).await.list.is_empty());
    }
}
