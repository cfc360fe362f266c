//! # Library Storage Layer
//!
//! Blob-backed persistence for the media library: domain models, blob key
//! derivation, the local cache and the four blob-family repositories that
//! the synchronization engine coordinates.
//!
//! ## Overview
//!
//! All durable state lives in individually-addressed JSON blobs inside the
//! remote store:
//!
//! - the global item index (`music-library.json`)
//! - the playlist index (`playlists.json`)
//! - one membership list per playlist (keyed by playlist id)
//! - one metadata record per item (keyed `<itemId>-meta`)
//!
//! The repositories in this crate own the read/parse/rewrite cycles for
//! those blob families. None of them hold state of their own; the only
//! mutable state outside the remote store is the non-owning
//! [`CachedStore`](cache::CachedStore).

pub mod cache;
pub mod error;
pub mod keys;
pub mod models;
pub mod repositories;

pub use cache::CachedStore;
pub use error::{ErrorKind, Issue, LibraryError, ListOutcome, Result};
pub use models::{ItemId, ItemMetadata, ItemSummary, Playlist, PlaylistId};
