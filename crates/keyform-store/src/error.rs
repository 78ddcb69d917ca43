/// Errors from key-value store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The key holds a different kind of structure than the operation needs.
    #[error("wrong type for {key}: expected {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A positional operation addressed an index outside the structure.
    #[error("index {index} out of range for {key} (length {len})")]
    IndexOutOfRange { key: String, index: i64, len: usize },

    /// The stored value cannot be interpreted as an integer counter.
    #[error("value at {key} is not an integer")]
    NotAnInteger { key: String },

    /// Failure reported by the backend itself (connectivity, protocol, locking).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
