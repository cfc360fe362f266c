//! Global item index repository.

use std::sync::Arc;

use bridge_traits::storage::BlobStore;

use crate::error::{ListOutcome, Result};
use crate::keys::ITEM_INDEX_KEY;
use crate::models::ItemSummary;
use crate::repositories::list_blob::{load_list, store_list};

/// The single "all items" ordered list blob, most-recently-added first.
///
/// Source of truth for browsing the whole library. Created lazily: an
/// absent blob reads as the empty index, and the index is never deleted.
#[derive(Clone)]
pub struct ItemIndex {
    store: Arc<dyn BlobStore>,
}

impl ItemIndex {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Read the index. Force the refresh before any read-modify-write.
    pub async fn list(&self, force_refresh: bool) -> ListOutcome<ItemSummary> {
        load_list(self.store.as_ref(), ITEM_INDEX_KEY, force_refresh).await
    }

    /// Overwrite the index with `entries`.
    pub async fn save(&self, entries: &[ItemSummary]) -> Result<()> {
        store_list(self.store.as_ref(), ITEM_INDEX_KEY, entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedStore;
    use crate::models::ItemId;
    use bridge_memory::MemoryStore;

    fn index() -> ItemIndex {
        ItemIndex::new(Arc::new(CachedStore::new(Arc::new(MemoryStore::new()))))
    }

    #[tokio::test]
    async fn test_lazy_creation() {
        let index = index();
        let outcome = index.list(true).await;
        assert!(outcome.list.is_empty());
        assert!(outcome.is_clean());
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let index = index();
        let entries = vec![
            ItemSummary::new(ItemId::new(), "newest.mp3"),
            ItemSummary::new(ItemId::new(), "older.mp3"),
        ];
        index.save(&entries).await.unwrap();

        let outcome = index.list(true).await;
        assert_eq!(outcome.list, entries);
    }
}
