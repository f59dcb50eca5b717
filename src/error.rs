//! Error types for the task store.

/// Errors surfaced by store operations.
///
/// `Validation` and `NotFound` are recoverable by the caller; `Storage`
/// failures may be retried by the caller (the store never retries on its
/// own); `Migration` is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Caller-supplied data violates a precondition. Never corrupts
    /// stored state.
    #[error("{0}")]
    Validation(String),

    /// The referenced task id does not exist.
    #[error("task not found: {0}")]
    NotFound(i64),

    /// The persistence layer rejected a statement or is unreachable.
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A schema step failed for a reason other than "already applied".
    /// The process must not serve requests after this.
    #[error("schema step '{step}' failed: {source}")]
    Migration {
        step: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
