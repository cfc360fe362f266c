//! # Library Synchronization Engine
//!
//! The central coordinator for item/playlist CRUD over the blob store.
//!
//! ## Workflow
//!
//! Every mutating operation follows the same shape:
//!
//! 1. Forced-refresh read of the list blob(s) it will rewrite
//! 2. In-memory edit (prepend / splice / field update)
//! 3. Whole-blob write back
//!
//! There are no cross-blob transactions: an operation that fails midway
//! leaves the store in a partially-applied state and says so through its
//! return value rather than rolling back. The engine itself holds no
//! durable state; all state lives in the four blob families, and caching
//! belongs to the [`BlobStore`] implementation it is constructed with.

use std::sync::Arc;

use bridge_traits::storage::BlobStore;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use core_library::error::{ErrorKind, Issue, LibraryError, ListOutcome};
use core_library::keys;
use core_library::models::{ItemId, ItemMetadata, ItemSummary, Playlist, PlaylistId};
use core_library::repositories::{ItemIndex, ItemMetadataStore, MembershipLists, PlaylistIndex};

use crate::config::EngineConfig;
use crate::error::{Result, SyncError};

/// Positional neighbors of an item inside a list.
///
/// Both sides are `None` when the item is absent from the list; the first
/// entry has no `previous_id` and the last has no `next_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbors {
    pub previous_id: Option<ItemId>,
    pub next_id: Option<ItemId>,
}

/// Stateless synchronization engine over a cache-fronted blob store.
pub struct SyncEngine {
    store: Arc<dyn BlobStore>,
    items: ItemIndex,
    playlists: PlaylistIndex,
    memberships: MembershipLists,
    metadata: ItemMetadataStore,
    config: EngineConfig,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<dyn BlobStore>, config: EngineConfig) -> Self {
        Self {
            items: ItemIndex::new(store.clone()),
            playlists: PlaylistIndex::new(store.clone()),
            memberships: MembershipLists::new(store.clone()),
            metadata: ItemMetadataStore::new(store.clone()),
            store,
            config,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// List the global index, or one playlist's membership list.
    ///
    /// Returns whatever could be read plus the classified failures; a
    /// missing blob is the empty list with no error.
    pub async fn list_items(
        &self,
        force_refresh: bool,
        playlist_id: Option<PlaylistId>,
    ) -> ListOutcome<ItemSummary> {
        match playlist_id {
            Some(id) => self.memberships.list(id, force_refresh).await,
            None => self.items.list(force_refresh).await,
        }
    }

    /// List all playlist descriptors.
    pub async fn list_playlists(&self, force_refresh: bool) -> ListOutcome<Playlist> {
        self.playlists.list(force_refresh).await
    }

    /// Fetch an item's raw bytes. The one pass-through read the engine
    /// exposes; callers stream the payload to the renderer.
    pub async fn item_bytes(&self, id: ItemId) -> Result<Option<Bytes>> {
        self.store
            .get_item(&keys::raw_key(id), false)
            .await
            .map_err(|err| {
                warn!(item_id = %id, error = %err, "raw blob fetch failed");
                SyncError::ReadFailed(err.to_string())
            })
    }

    /// Fetch an item's metadata record, degraded to an index summary when
    /// the record predates metadata-blob introduction. Store failures read
    /// as absent.
    pub async fn item_metadata(&self, id: ItemId) -> Option<ItemMetadata> {
        self.metadata_or_none(id).await
    }

    /// Persist an item's metadata record.
    ///
    /// # Errors
    /// `InvalidArgument` when the id is nil or the record is incomplete;
    /// `WriteFailed` when the store rejected the put.
    pub async fn set_item_metadata(&self, id: ItemId, metadata: &ItemMetadata) -> Result<()> {
        self.metadata.set(id, metadata).await.map_err(|err| match err {
            LibraryError::InvalidInput { message, .. } => SyncError::InvalidArgument(message),
            other => {
                error!(item_id = %id, error = %other, "metadata write failed");
                SyncError::WriteFailed(other.to_string())
            }
        })
    }

    /// Immediately preceding/following entry ids around `id`, by position.
    /// Pure read, no side effects.
    pub async fn neighbors(&self, id: ItemId, playlist_id: Option<PlaylistId>) -> Neighbors {
        let outcome = self.list_items(true, playlist_id).await;
        let list = outcome.list;

        match list.iter().position(|entry| entry.id == id) {
            Some(pos) => Neighbors {
                previous_id: pos.checked_sub(1).map(|prev| list[prev].id),
                next_id: list.get(pos + 1).map(|entry| entry.id),
            },
            None => Neighbors::default(),
        }
    }

    /// Look up one playlist's descriptor in the playlist index.
    pub async fn playlist_metadata(&self, id: PlaylistId) -> Option<Playlist> {
        self.playlists
            .list(false)
            .await
            .list
            .into_iter()
            .find(|playlist| playlist.id == id)
    }

    // =========================================================================
    // Item mutations
    // =========================================================================

    /// Upload a new item: raw bytes, optional thumbnail rendition, metadata
    /// record, and a position-0 entry in the global index (and in the
    /// target playlist's membership list, which also takes the new item as
    /// its thumbnail).
    ///
    /// When the payload writes fail, the failure is classified by size
    /// (`FileTooLarge` at or above the configured threshold, otherwise
    /// `WriteFailed`), the prepend is skipped, and the index write is still
    /// attempted so the index keeps progressing. A thumbnail retarget lost
    /// to a store failure is reported as a `WriteFailed` issue. The
    /// returned list is the index content as written.
    #[instrument(skip(self, metadata, data, thumbnail), fields(item_id = %metadata.id, size = data.len()))]
    pub async fn upload(
        &self,
        metadata: ItemMetadata,
        data: Bytes,
        playlist_id: Option<PlaylistId>,
        thumbnail: Option<Bytes>,
    ) -> ListOutcome<ItemSummary> {
        let index = self.items.list(true).await;
        let mut list = index.list;
        let mut errors = index.errors;

        let mut playlist_entries = Vec::new();
        if let Some(id) = playlist_id {
            let membership = self.memberships.list(id, true).await;
            playlist_entries = membership.list;
            errors.extend(membership.errors);
        }

        let summary = metadata.summary();
        let payload_size = metadata.size_bytes.unwrap_or(data.len() as u64);

        match self.write_item_blobs(&metadata, data, thumbnail).await {
            Ok(()) => {
                list.insert(0, summary.clone());
                if let Some(id) = playlist_id {
                    // Thumbnail always tracks the newest upload into the playlist.
                    if let Err(err) = self.retarget_thumbnail(id, metadata.id).await {
                        error!(playlist_id = %id, error = %err, "thumbnail retarget failed");
                        errors.push(Issue::of(ErrorKind::WriteFailed));
                    }
                    playlist_entries.insert(0, summary);
                }
                info!(item_id = %metadata.id, "item uploaded");
            }
            Err(err) => {
                error!(item_id = %metadata.id, error = %err, "item blob writes failed");
                errors.push(Issue::for_record(
                    metadata.filename.clone(),
                    self.classify_upload_failure(payload_size),
                ));
            }
        }

        // Attempted even after a failed payload write; documented
        // lossy-on-error behavior that keeps the index append-only-progressing.
        if let Err(err) = self.items.save(&list).await {
            error!(error = %err, "item index write failed");
            errors.push(Issue::of(ErrorKind::WriteFailed));
        }

        if let Some(id) = playlist_id {
            if let Err(err) = self.memberships.save(id, &playlist_entries).await {
                error!(playlist_id = %id, error = %err, "membership list write failed");
                errors.push(Issue::of(ErrorKind::WriteFailed));
            }
        }

        ListOutcome { list, errors }
    }

    /// Add a batch of items to a playlist, idempotently.
    ///
    /// An item whose metadata already lists the playlist is skipped, so a
    /// repeated add leaves exactly one membership entry. The playlist
    /// thumbnail is retargeted to the first id of the batch whether or not
    /// that id was newly added.
    ///
    /// # Errors
    /// `InvalidArgument` when `item_ids` is empty.
    #[instrument(skip(self, item_ids), fields(playlist_id = %playlist_id, count = item_ids.len()))]
    pub async fn add_to_playlist(
        &self,
        playlist_id: PlaylistId,
        item_ids: &[ItemId],
    ) -> Result<bool> {
        if item_ids.is_empty() {
            return Err(SyncError::InvalidArgument(
                "at least one item id is required".to_string(),
            ));
        }

        // A failed read leaves the working list empty and the write below
        // rebuilds it from this batch alone; accepted last-write-wins
        // limitation of the backend.
        let mut entries = self.memberships.list(playlist_id, true).await.list;

        for &id in item_ids {
            let Some(metadata) = self.metadata_or_none(id).await else {
                warn!(item_id = %id, "skipping unknown item");
                continue;
            };
            if metadata.playlist_ids.contains(&playlist_id) {
                debug!(item_id = %id, "already a member, skipping");
                continue;
            }

            entries.insert(0, metadata.summary());

            let mut updated = metadata;
            updated.playlist_ids.insert(playlist_id);
            if let Err(err) = self.metadata.set(id, &updated).await {
                error!(item_id = %id, error = %err, "membership-set update failed");
                return Ok(false);
            }
        }

        if let Err(err) = self.memberships.save(playlist_id, &entries).await {
            error!(playlist_id = %playlist_id, error = %err, "membership list write failed");
            return Ok(false);
        }

        let _ = self.update_playlist_thumbnail(playlist_id, item_ids[0]).await;
        Ok(true)
    }

    /// Delete an item everywhere: its four blobs, its global-index entry,
    /// and its entry in every membership list named by its pre-delete
    /// metadata.
    ///
    /// The four blob deletes are independent; the first failure aborts with
    /// `false` without rolling back earlier deletes and without index
    /// cleanup (known gap, kept as documented).
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_item(&self, id: ItemId) -> bool {
        // Pre-delete snapshot; the metadata blob is gone by the time the
        // membership lists are rewritten.
        let metadata = self.metadata_or_none(id).await;

        for key in [
            keys::raw_key(id),
            keys::metadata_key(id),
            keys::thumbnail_key(id),
            keys::viewer_key(id),
        ] {
            if let Err(err) = self.store.delete_item(&key).await {
                error!(key, error = %err, "blob delete failed, aborting");
                return false;
            }
        }

        let mut removed = self.remove_from_list(id, None).await;

        if let Some(metadata) = metadata {
            for &playlist_id in &metadata.playlist_ids {
                removed = self.remove_from_list(id, Some(playlist_id)).await;
                if !removed {
                    return false;
                }
            }
        }

        if removed {
            info!(item_id = %id, "item deleted");
        }
        removed
    }

    /// Remove one entry from the global index (`playlist_id` absent) or
    /// from a membership list, and repair the item's own membership set.
    ///
    /// When the shortened membership list stays non-empty its playlist
    /// thumbnail follows the new head entry; an emptied list keeps its
    /// stale thumbnail. The membership-set repair runs whether or not the
    /// id was found in the list; it is a no-op-safe idempotent update.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn remove_from_list(&self, id: ItemId, playlist_id: Option<PlaylistId>) -> bool {
        let mut list = self.list_items(true, playlist_id).await.list;

        if let Some(pos) = list.iter().position(|entry| entry.id == id) {
            list.remove(pos);

            let write = match playlist_id {
                Some(playlist_id) => self.memberships.save(playlist_id, &list).await,
                None => self.items.save(&list).await,
            };
            if let Err(err) = write {
                error!(error = %err, "shortened list write failed");
                return false;
            }

            if let Some(playlist_id) = playlist_id {
                if let Some(head) = list.first() {
                    let _ = self.update_playlist_thumbnail(playlist_id, head.id).await;
                }
            }
        }

        if let Some(mut metadata) = self.metadata_or_none(id).await {
            if let Some(playlist_id) = playlist_id {
                metadata.playlist_ids.remove(&playlist_id);
            }
            if let Err(err) = self.metadata.set(id, &metadata).await {
                error!(item_id = %id, error = %err, "membership-set repair failed");
                return false;
            }
        }

        true
    }

    /// Sequentially delete a batch of items, stopping at the first
    /// failure. Earlier deletions are not rolled back; after a `false`
    /// result the caller should force-refresh and re-read before retrying.
    pub async fn delete_items(&self, item_ids: &[ItemId]) -> bool {
        for &id in item_ids {
            if !self.delete_item(id).await {
                warn!(item_id = %id, "batch delete aborted");
                return false;
            }
        }
        true
    }

    /// Sequentially remove a batch of items from one list, stopping at the
    /// first failure without rollback.
    pub async fn remove_items_from_list(
        &self,
        item_ids: &[ItemId],
        playlist_id: Option<PlaylistId>,
    ) -> bool {
        for &id in item_ids {
            if !self.remove_from_list(id, playlist_id).await {
                warn!(item_id = %id, "batch removal aborted");
                return false;
            }
        }
        true
    }

    // =========================================================================
    // Playlist mutations
    // =========================================================================

    /// Create a playlist: an empty membership blob plus a position-0
    /// descriptor in the playlist index.
    #[instrument(skip(self))]
    pub async fn create_playlist(&self, name: &str) -> ListOutcome<Playlist> {
        let index = self.playlists.list(true).await;
        let mut playlists = index.list;
        let mut errors = index.errors;

        let playlist = Playlist::new(name);
        if let Err(message) = playlist.validate() {
            warn!(message, "rejecting playlist creation");
            errors.push(Issue::of(ErrorKind::InvalidArgument));
            return ListOutcome { list: playlists, errors };
        }

        match self.memberships.save(playlist.id, &[]).await {
            Ok(()) => {
                info!(playlist_id = %playlist.id, "playlist created");
                playlists.insert(0, playlist);
            }
            Err(err) => {
                error!(playlist_id = %playlist.id, error = %err, "membership blob creation failed");
                errors.push(Issue::for_record(
                    playlist.id.to_string(),
                    ErrorKind::WriteFailed,
                ));
            }
        }

        if let Err(err) = self.playlists.save(&playlists).await {
            error!(error = %err, "playlist index write failed");
            errors.push(Issue::of(ErrorKind::WriteFailed));
        }

        ListOutcome { list: playlists, errors }
    }

    /// Rename a playlist.
    ///
    /// # Returns
    /// `Ok(false)` when the playlist is not in the index (a normal,
    /// recoverable outcome) or when the rewrite failed.
    ///
    /// # Errors
    /// `InvalidArgument` when the id is nil or the name is empty.
    pub async fn rename_playlist(&self, id: PlaylistId, name: &str) -> Result<bool> {
        if id.is_nil() || name.trim().is_empty() {
            return Err(SyncError::InvalidArgument(
                "playlist id and name are required".to_string(),
            ));
        }

        let mut playlists = self.playlists.list(true).await.list;
        let Some(entry) = playlists.iter_mut().find(|playlist| playlist.id == id) else {
            debug!(playlist_id = %id, "rename target not found");
            return Ok(false);
        };
        entry.name = name.to_string();

        match self.playlists.save(&playlists).await {
            Ok(()) => Ok(true),
            Err(err) => {
                error!(playlist_id = %id, error = %err, "playlist index write failed");
                Ok(false)
            }
        }
    }

    /// Point a playlist's thumbnail at an item.
    ///
    /// # Returns
    /// `Ok(false)` when the playlist is not in the index or the rewrite
    /// failed.
    ///
    /// # Errors
    /// `InvalidArgument` when either id is nil.
    pub async fn update_playlist_thumbnail(
        &self,
        id: PlaylistId,
        thumbnail_item_id: ItemId,
    ) -> Result<bool> {
        if id.is_nil() || thumbnail_item_id.is_nil() {
            return Err(SyncError::InvalidArgument(
                "playlist id and thumbnail item id are required".to_string(),
            ));
        }

        match self.retarget_thumbnail(id, thumbnail_item_id).await {
            Ok(found) => Ok(found),
            Err(err) => {
                error!(playlist_id = %id, error = %err, "playlist index write failed");
                Ok(false)
            }
        }
    }

    /// Delete a playlist: overwrite its membership blob with the empty
    /// array (the store cannot remove keys) and drop its descriptor from
    /// the playlist index. Items keep their membership-set references until
    /// individually touched; the lists they pointed at are empty.
    #[instrument(skip(self), fields(playlist_id = %id))]
    pub async fn delete_playlist(&self, id: PlaylistId) -> bool {
        if let Err(err) = self.memberships.clear(id).await {
            error!(error = %err, "membership blob clear failed");
            return false;
        }

        let mut playlists = self.playlists.list(true).await.list;
        let Some(pos) = playlists.iter().position(|playlist| playlist.id == id) else {
            return false;
        };
        playlists.remove(pos);

        match self.playlists.save(&playlists).await {
            Ok(()) => {
                info!(playlist_id = %id, "playlist deleted");
                true
            }
            Err(err) => {
                error!(error = %err, "playlist index write failed");
                false
            }
        }
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn write_item_blobs(
        &self,
        metadata: &ItemMetadata,
        data: Bytes,
        thumbnail: Option<Bytes>,
    ) -> core_library::Result<()> {
        self.store.set_item(&keys::raw_key(metadata.id), data).await?;
        if let Some(thumbnail) = thumbnail {
            self.store
                .set_item(&keys::thumbnail_key(metadata.id), thumbnail)
                .await?;
        }
        self.metadata.set(metadata.id, metadata).await?;
        Ok(())
    }

    /// Point a playlist's thumbnail at an item, surfacing store failures
    /// to the caller. Returns `Ok(false)` when the playlist is not in the
    /// index, which is not an error.
    async fn retarget_thumbnail(
        &self,
        id: PlaylistId,
        thumbnail_item_id: ItemId,
    ) -> core_library::Result<bool> {
        let mut playlists = self.playlists.list(true).await.list;
        let Some(entry) = playlists.iter_mut().find(|playlist| playlist.id == id) else {
            debug!(playlist_id = %id, "thumbnail target not found");
            return Ok(false);
        };
        entry.thumbnail_item_id = Some(thumbnail_item_id);
        self.playlists.save(&playlists).await?;
        Ok(true)
    }

    fn classify_upload_failure(&self, payload_size: u64) -> ErrorKind {
        if payload_size >= self.config.large_upload_threshold_bytes {
            ErrorKind::FileTooLarge
        } else {
            ErrorKind::WriteFailed
        }
    }

    async fn metadata_or_none(&self, id: ItemId) -> Option<ItemMetadata> {
        match self.metadata.get(id).await {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(item_id = %id, error = %err, "metadata lookup failed, treating as absent");
                None
            }
        }
    }
}
