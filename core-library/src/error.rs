//! Error taxonomy for the storage layer.
//!
//! Two layers: [`LibraryError`] is the internal propagation type used with
//! `?` inside repositories, while [`ErrorKind`] is the closed, UI-facing
//! classification that operations hand back in their `errorsList`. Store
//! failures never escape the engine boundary as raw errors; they are
//! converted to [`Issue`]s (or boolean results) there.

use bridge_traits::error::BridgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed classification of operation failures.
///
/// Callers key degraded-mode UI (toast messages) off this enum; nothing
/// outside it is ever surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Index or list fetch / parse failure.
    ReadFailed,
    /// Generic store write failure.
    WriteFailed,
    /// Upload payload at or above the size threshold.
    FileTooLarge,
    /// Missing required id, name or metadata argument.
    InvalidArgument,
    /// Scan found no matching record. Reported as a boolean `false` or an
    /// empty result by the operations themselves; listed here so the
    /// taxonomy is complete.
    NotFound,
}

/// One entry of an operation's `errorsList`.
///
/// List reads report a bare kind; uploads attach the filename of the item
/// that failed so the UI can name it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Identifier of the affected record, when one is known.
    pub id: Option<String>,
    pub kind: ErrorKind,
}

impl Issue {
    /// An issue not tied to a particular record.
    pub fn of(kind: ErrorKind) -> Self {
        Self { id: None, kind }
    }

    /// An issue attributed to a named record.
    pub fn for_record(id: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
        }
    }
}

/// A possibly-degraded list result: whatever could be produced, plus the
/// classified failures encountered while producing it.
#[derive(Debug, Clone, Default)]
pub struct ListOutcome<T> {
    pub list: Vec<T>,
    pub errors: Vec<Issue>,
}

impl<T> ListOutcome<T> {
    pub fn ok(list: Vec<T>) -> Self {
        Self {
            list,
            errors: Vec::new(),
        }
    }

    pub fn empty_with(kind: ErrorKind) -> Self {
        Self {
            list: Vec::new(),
            errors: vec![Issue::of(kind)],
        }
    }

    /// True when no failure was recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Malformed blob content: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },
}

impl LibraryError {
    /// Classify this error for the UI-facing errors list, given whether it
    /// happened while reading or writing.
    pub fn kind(&self, writing: bool) -> ErrorKind {
        match self {
            LibraryError::Bridge(_) | LibraryError::Malformed(_) => {
                if writing {
                    ErrorKind::WriteFailed
                } else {
                    ErrorKind::ReadFailed
                }
            }
            LibraryError::InvalidInput { .. } => ErrorKind::InvalidArgument,
            LibraryError::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::FileTooLarge).unwrap();
        assert_eq!(json, r#""file_too_large""#);
    }

    #[test]
    fn test_classification_depends_on_direction() {
        let err = LibraryError::Bridge(BridgeError::operation("k", "boom"));
        assert_eq!(err.kind(false), ErrorKind::ReadFailed);
        assert_eq!(err.kind(true), ErrorKind::WriteFailed);
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_argument() {
        let err = LibraryError::InvalidInput {
            field: "name".to_string(),
            message: "empty".to_string(),
        };
        assert_eq!(err.kind(true), ErrorKind::InvalidArgument);
    }
}
