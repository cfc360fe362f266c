//! Playlist index repository.
//!
//! Symmetric to [`ItemIndex`](crate::repositories::ItemIndex): one ordered
//! list blob of playlist descriptors, most-recently-created first, created
//! lazily and never deleted.

use std::sync::Arc;

use bridge_traits::storage::BlobStore;

use crate::error::{ListOutcome, Result};
use crate::keys::PLAYLIST_INDEX_KEY;
use crate::models::Playlist;
use crate::repositories::list_blob::{load_list, store_list};

#[derive(Clone)]
pub struct PlaylistIndex {
    store: Arc<dyn BlobStore>,
}

impl PlaylistIndex {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Read the playlist index. Force the refresh before any
    /// read-modify-write.
    pub async fn list(&self, force_refresh: bool) -> ListOutcome<Playlist> {
        load_list(self.store.as_ref(), PLAYLIST_INDEX_KEY, force_refresh).await
    }

    /// Overwrite the playlist index with `playlists`.
    pub async fn save(&self, playlists: &[Playlist]) -> Result<()> {
        store_list(self.store.as_ref(), PLAYLIST_INDEX_KEY, playlists).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedStore;
    use bridge_memory::MemoryStore;

    #[tokio::test]
    async fn test_descriptor_roundtrip() {
        let index = PlaylistIndex::new(Arc::new(CachedStore::new(Arc::new(MemoryStore::new()))));

        let playlists = vec![Playlist::new("Gym"), Playlist::new("Focus")];
        index.save(&playlists).await.unwrap();

        let outcome = index.list(true).await;
        assert_eq!(outcome.list.len(), 2);
        assert_eq!(outcome.list[0].name, "Gym");
        assert!(outcome.list[0].thumbnail_item_id.is_none());
    }
}
