//! Blob-family repositories.
//!
//! One repository per durable blob family. The item index and playlist
//! index are symmetric single-blob ordered lists; membership lists are the
//! same shape keyed per playlist; metadata records are one blob per item.
//! All of them run plain read-latest / mutate-in-memory / write-whole-blob
//! cycles against the [`BlobStore`](bridge_traits::storage::BlobStore) they
//! are constructed with.

mod item_index;
mod list_blob;
mod membership;
mod metadata;
mod playlist_index;

pub use item_index::ItemIndex;
pub use membership::MembershipLists;
pub use metadata::ItemMetadataStore;
pub use playlist_index::PlaylistIndex;
