use tapp_types::ValidationErrors;

/// Errors from user and trade store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No user with the requested id exists.
    #[error("User {0} not found")]
    UserNotFound(i64),

    /// A writer panicked while holding a store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Seed records failed schema validation.
    #[error("invalid seed data: {0}")]
    InvalidSeed(#[from] ValidationErrors),

    /// The seed document is not well-formed JSON.
    #[error("malformed seed document: {0}")]
    MalformedSeed(#[from] serde_json::Error),

    /// I/O error reading a seed file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn poisoned<E: std::fmt::Display>(e: E) -> Self {
        Self::LockPoisoned(e.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
