use arx_types::ArtifactId;

/// Errors from envelope store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No live envelope exists for the identifier.
    #[error("envelope not found: {0}")]
    NotFound(ArtifactId),

    /// An envelope with this identifier already exists.
    #[error("envelope already exists: {0}")]
    AlreadyExists(ArtifactId),

    /// Optimistic concurrency check failed: the envelope moved on.
    #[error("version conflict on {id}: expected {expected}, found {actual}")]
    VersionConflict {
        id: ArtifactId,
        expected: u64,
        actual: u64,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure that maps to no other variant.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
