/// Errors from world state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Range scan bounds are inverted.
    #[error("invalid key range: start {start:?} is after end {end:?}")]
    InvalidRange { start: String, end: String },

    /// The snapshot file failed its integrity checks.
    #[error("corrupt state snapshot: {0}")]
    CorruptSnapshot(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by an external store implementation.
    #[error("state backend error: {0}")]
    Backend(String),
}

/// Result alias for world state operations.
pub type StateResult<T> = Result<T, StateError>;
