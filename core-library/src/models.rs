//! Domain models for the media library.
//!
//! These are the shapes persisted inside the JSON blobs: index/membership
//! entries carry the minimal [`ItemSummary`], full descriptors live in
//! per-item [`ItemMetadata`] records, and the playlist index stores
//! [`Playlist`] descriptors. Field names in JSON match the wire layout the
//! mobile/web clients already read (camelCase).

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a library item (song/photo).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a playlist (album/collection).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PlaylistId(pub Uuid);

impl PlaylistId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Domain Models
// =============================================================================

/// The minimal item shape embedded in the global index and in membership
/// lists, as opposed to the full metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub filename: String,
}

impl ItemSummary {
    pub fn new(id: ItemId, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
        }
    }
}

/// Full per-item descriptor, stored as its own blob under `<itemId>-meta`.
///
/// `size_bytes` and `created_at` are optional because lookups can fall back
/// to a degraded record rebuilt from an index summary when the metadata
/// blob predates metadata-record introduction. `playlist_ids` must
/// eventually equal the set of membership lists that actually contain this
/// item; the engine repairs it on every membership mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub id: ItemId,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub playlist_ids: BTreeSet<PlaylistId>,
}

impl ItemMetadata {
    /// A complete descriptor, as written at upload time.
    pub fn new(id: ItemId, filename: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id,
            filename: filename.into(),
            size_bytes: Some(size_bytes),
            created_at: Some(Utc::now()),
            playlist_ids: BTreeSet::new(),
        }
    }

    /// Degraded descriptor rebuilt from an index summary. Lacks size and
    /// creation time and carries an empty membership set.
    pub fn degraded(summary: &ItemSummary) -> Self {
        Self {
            id: summary.id,
            filename: summary.filename.clone(),
            size_bytes: None,
            created_at: None,
            playlist_ids: BTreeSet::new(),
        }
    }

    /// Validate the record before it is persisted.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_nil() {
            return Err("Item id cannot be nil".to_string());
        }
        if self.filename.trim().is_empty() {
            return Err("Item filename cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn summary(&self) -> ItemSummary {
        ItemSummary::new(self.id, self.filename.clone())
    }
}

/// Playlist descriptor as stored in the playlist index.
///
/// `thumbnail_item_id`, when set, should reference an item currently in
/// this playlist's membership list. One documented exception: when the last
/// entry is removed from a playlist the thumbnail is left stale rather than
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub thumbnail_item_id: Option<ItemId>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::new(),
            name: name.into(),
            created_at: Utc::now(),
            thumbnail_item_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Playlist name cannot be empty".to_string());
        }
        Ok(())
    }
}
