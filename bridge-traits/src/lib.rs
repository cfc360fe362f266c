//! # Host Bridge Traits
//!
//! Storage abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the library core and the
//! per-account remote object store it persists into. The core never talks to
//! a concrete backend; it is handed trait objects at construction time.
//!
//! ## Traits
//!
//! - [`RemoteStore`](storage::RemoteStore) - The raw remote key-value blob
//!   namespace (one value per string key, each call fails independently)
//! - [`BlobStore`](storage::BlobStore) - The cache-fronted view the engine
//!   consumes, with explicit forced-refresh reads
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Host implementations should convert backend-specific errors to
//! `BridgeError` and include enough context to diagnose the failing key.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks.

pub mod error;
pub mod storage;

pub use error::BridgeError;
pub use storage::{BlobStore, RemoteStore};
