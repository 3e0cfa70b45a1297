use busbook_types::TypeError;

/// Errors from snapshot encoding, decoding, and storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot line could not be parsed.
    #[error("malformed snapshot line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A snapshot line names a seat outside the fixed coordinate space.
    #[error("snapshot line {line}: {source}")]
    CoordinateOutOfRange {
        line: usize,
        #[source]
        source: TypeError,
    },

    /// A backend lock was poisoned by a panicking writer.
    #[error("snapshot store lock poisoned")]
    Poisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
