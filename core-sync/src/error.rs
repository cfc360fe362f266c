use core_library::ErrorKind;
use thiserror::Error;

/// Failures the engine reports eagerly instead of folding into an
/// operation's partial result.
///
/// Store failures are never propagated this way; the operations convert
/// them into `errorsList` entries or boolean `false` results at the engine
/// boundary. What remains is argument validation plus the raw pass-through
/// read.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

impl SyncError {
    /// The UI-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SyncError::ReadFailed(_) => ErrorKind::ReadFailed,
            SyncError::WriteFailed(_) => ErrorKind::WriteFailed,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
