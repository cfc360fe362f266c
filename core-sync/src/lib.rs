//! # Synchronization Engine
//!
//! Coordinates the four blob-family stores (item index, playlist index,
//! membership lists, item metadata) to implement item/playlist CRUD with
//! best-effort referential integrity, given only per-blob atomic read/write
//! primitives.
//!
//! ## Overview
//!
//! The engine is a stateless set of operations over explicit blob contents:
//! every mutation is a forced-refresh read, an in-memory list edit and a
//! whole-blob write. Nothing is atomic across blobs, so operations return
//! whatever partial result they produced plus a classified errors list
//! instead of raising; callers render the degraded list and decide whether
//! to re-sync.
//!
//! ## Components
//!
//! - **Engine** (`engine`): the CRUD operations of the library
//! - **Config** (`config`): upload classification threshold
//! - **Errors** (`error`): argument-validation failures the operations
//!   report eagerly
//!
//! ## Consistency
//!
//! Two concurrent writers to the same list blob race last-write-wins; the
//! backend offers no conditional writes and the engine does not layer
//! optimistic versioning on top. The forced-refresh read narrows the window
//! but does not close it.

pub mod config;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use engine::{Neighbors, SyncEngine};
pub use error::{Result, SyncError};

// The UI-facing outcome types live with the storage layer; re-export them
// so engine callers need a single dependency.
pub use core_library::{ErrorKind, Issue, ListOutcome};
