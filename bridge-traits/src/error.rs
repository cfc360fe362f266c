use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation failed for key {key}: {message}")]
    OperationFailed { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Shorthand for an operation failure scoped to a key.
    pub fn operation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OperationFailed {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
