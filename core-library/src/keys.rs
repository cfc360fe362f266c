//! Blob key derivation.
//!
//! Every durable value lives under one string key in the remote namespace.
//! The layout is fixed by the clients already in the field:
//!
//! | key                    | content                         |
//! |------------------------|---------------------------------|
//! | `music-library.json`   | global item index               |
//! | `playlists.json`       | playlist index                  |
//! | `<playlistId>`         | membership list                 |
//! | `<itemId>`             | raw item bytes                  |
//! | `<itemId>-meta`        | item metadata record            |
//! | `<itemId>-thumbnail`   | thumbnail rendition (opaque)    |
//! | `<itemId>-viewer`      | viewer rendition (opaque)       |

use crate::models::{ItemId, PlaylistId};

/// Key of the global item index blob.
pub const ITEM_INDEX_KEY: &str = "music-library.json";

/// Key of the playlist index blob.
pub const PLAYLIST_INDEX_KEY: &str = "playlists.json";

/// Key of a playlist's membership list blob.
pub fn membership_key(id: PlaylistId) -> String {
    id.to_string()
}

/// Key of an item's raw bytes.
pub fn raw_key(id: ItemId) -> String {
    id.to_string()
}

/// Key of an item's metadata record.
pub fn metadata_key(id: ItemId) -> String {
    format!("{}-meta", id)
}

/// Key of an item's thumbnail rendition.
pub fn thumbnail_key(id: ItemId) -> String {
    format!("{}-thumbnail", id)
}

/// Key of an item's viewer rendition.
pub fn viewer_key(id: ItemId) -> String {
    format!("{}-viewer", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_keys_embed_the_id() {
        let id = ItemId::new();
        assert_eq!(raw_key(id), id.to_string());
        assert_eq!(metadata_key(id), format!("{}-meta", id));
        assert_eq!(thumbnail_key(id), format!("{}-thumbnail", id));
        assert_eq!(viewer_key(id), format!("{}-viewer", id));
    }

    #[test]
    fn test_index_keys_are_distinct() {
        assert_ne!(ITEM_INDEX_KEY, PLAYLIST_INDEX_KEY);
    }
}
